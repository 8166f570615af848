/*!

# User manual

`rctab` tabulates a ranked-choice election using the Instant-Runoff Voting
scheme: the candidate ranked first on a strict majority of the ballots wins;
as long as no such candidate exists, the candidate with the fewest first
choices is eliminated and its ballots transfer to their next ranked choice.

## Input format

The expected input is a spreadsheet export (CSV or Excel) with one row per
voter, the kind produced by survey tools such as Qualtrics or Google Forms:

```text
Response ID, ...,        Alice, Bob, Charlie
R_1,         ...,        1,     2,
R_2,         ...,        2,     ,   1
```

- Columns before `--first-vote-column` (1-based, default 18) carry voter
  metadata and are ignored.
- The first row is a header; its remaining cells are the candidate names.
- Every other cell either holds the rank the voter gave that candidate, or
  is ignored. Ranks do not need to be contiguous; candidates sharing a rank
  keep their column order.
- Rows without a single valid rank are not ballots and are discarded.

## Running a tabulation

```bash
rctab --input votes.csv --first-vote-column 3
```

reads `votes.csv`, prints the elimination history round by round and the
winner. Without `--input`, a CSV document is read from the standard input.
Excel workbooks are selected with `--input-type excel` (or a `.xlsx` file
extension); use `--excel-worksheet-name` when the workbook holds more than
one worksheet.

```text
Round 1
        2 Alice
        1 Bob
        1 Charlie
    eliminated: Charlie
Round 2
        3 Alice
        1 Bob
Winner: Alice
```

## Majority and termination

The majority threshold is strictly more than half of the ballots read at the
start, and it never shrinks: a ballot whose every ranked candidate has been
eliminated is exhausted and no longer carries a vote, but it still counts
toward the threshold. An election in which every ballot exhausts before any
candidate reaches that threshold fails with an explicit error.

When several candidates are tied for the fewest votes, the one whose name
sorts last is eliminated. This rule is arbitrary but deterministic: the same
ballots always produce the same history.

## JSON summary

`--out summary.json` (or `--out stdout`) writes a machine-readable summary:

```json
{
  "winner": "Alice",
  "rounds": [
    {
      "round": 1,
      "tally": [["Alice", 2], ["Bob", 1], ["Charlie", 1]],
      "exhausted": 0,
      "eliminated": "Charlie"
    },
    {
      "round": 2,
      "tally": [["Alice", 3], ["Bob", 1]],
      "exhausted": 0,
      "eliminated": null
    }
  ]
}
```

`--reference expected.json` compares the summary against a previously saved
file and fails with a printed diff when they differ, which makes recounts of
archived elections scriptable.

## Using the library directly

The `instant_runoff` crate has no opinion on where ballots come from:

```no_run
use instant_runoff::builder::Builder;

# fn main() -> Result<(), instant_runoff::ElectionError> {
let mut builder = Builder::new();
builder.add_ballot(&["Alice".to_string(), "Bob".to_string()])?;
builder.add_ballot(&["Bob".to_string()])?;
builder.add_ballot(&["Alice".to_string()])?;
let result = builder.into_election()?.resolve()?;
for round in result.rounds.iter() {
    println!("round {}: {:?}", round.round, round.tally);
}
# Ok(())
# }
```

*/
