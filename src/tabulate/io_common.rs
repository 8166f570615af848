use std::path::Path;

/// Orders the (candidate, rank) pairs of one row into the voter's choice
/// list, most-preferred first. The sort is stable: candidates sharing a
/// rank keep their column order.
pub fn order_by_rank(ranks: &[(String, u32)]) -> Vec<String> {
    let mut pairs: Vec<(u32, &String)> = ranks.iter().map(|(name, rank)| (*rank, name)).collect();
    pairs.sort_by_key(|(rank, _)| *rank);
    pairs.into_iter().map(|(_, name)| name.clone()).collect()
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Ballot ids only show up in diagnostics; derive one from the source name
/// and the line number.
pub fn make_default_id(source: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(source);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}
