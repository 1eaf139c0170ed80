/*!

This is the long-form manual for `contest_ranking` and `cfstandings`.

## How the ranks are computed

The contest reports a raw rank for every row, and rows with the same
result share the same raw rank. The report keeps only the contestants that
are not excluded and that scored strictly more than `0.5` points, and then
ranks them again among themselves:

- contestants that share a raw rank share the exported rank
- the next group is ranked after everyone above it, ties included

| raw rank | exported rank |
|----------|---------------|
| 1        | 1             |
| 3        | 2             |
| 3        | 2             |
| 7        | 4             |

In the example above, the contestants ranked 2 and 4..6 by the contest were
excluded or did not score.

## Input formats

### Standings

The standings are a saved response of the `contest.standings` method of the
Codeforces API, for example with `showUnofficial=true`:

```text
{
  "status": "OK",
  "result": {
    "problems": [{"index": "A"}, {"index": "B"}],
    "rows": [
      {
        "party": {"members": [{"handle": "tourist"}]},
        "rank": 1,
        "points": 10.0,
        "problemResults": [{"points": 5.0}, {"points": 5.0}]
      }
    ]
  }
}
```

Only the first member of every party is considered. Every row must have one
problem result per problem. Rows with rank `0` are participants outside the
official ranking (practice, virtual): they are left out of the report.

### Roster

The roster is the table of the registered contestants, either:
* `xlsx` an Excel export of the registration spreadsheet
* `csv` a CSV export of the same spreadsheet

Rows shorter than the last configured column are skipped. Logins in the
roster may contain extra whitespace and may differ in case from the
contest handles. A contestant whose login is missing from the roster, or
appears more than once, is written with `Нет анкеты` ("no profile") instead of
a name and a school.

## Configuration

`cfstandings` accepts a configuration file in JSON:

```text
{
  "contest": {"contestId": "1234", "standingsFile": "standings.json"},
  "rosterSources": [
    {
      "provider": "xlsx",
      "filePath": "roster.xlsx",
      "worksheetName": "Form1",
      "firstRowIndex": 2,
      "nameColumnIndex": "A",
      "schoolColumnIndex": "B",
      "loginColumnIndex": "D"
    }
  ],
  "rules": {"excludedLogins": ["Bykov_David"], "minimumPoints": 0.5},
  "outputSettings": {"outputDirectory": "results", "tableName": "results"}
}
```

- paths are relative to the directory of the configuration file
- column indexes are either numbers starting at 1 or spreadsheet letters
- `rules` and all the indexes are optional. By default the name is in column
  `A`, the school in column `B`, the login in column `D`, and the first row
  is skipped.
- `outputSettings.labels` (optional) overrides the column names of the report:
  `rank`, `name`, `points`, `login`, `school` and `noProfile`.

 */
