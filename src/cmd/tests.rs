// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::change::select_files;
use super::view::describe_sync;
use crate::cli::change::LineSelection;
use crate::git::status::RepoSyncState;
use crate::patch::SelectionType;

const PATCH: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,3 +1,3 @@
 fn a() {}
-fn b() {}
+fn b2() {}
 fn c() {}
diff --git a/notes.txt b/notes.txt
new file mode 100644
--- /dev/null
+++ b/notes.txt
@@ -0,0 +1,2 @@
+one
+two
";

fn select(raw: &str) -> LineSelection {
    raw.parse().unwrap()
}

#[test]
fn test_describe_sync() {
    let lines: Vec<String> = [
        RepoSyncState::default(),
        RepoSyncState {
            is_repo: true,
            ..Default::default()
        },
        RepoSyncState {
            ahead: 2,
            behind: 1,
            has_upstream: true,
            is_repo: true,
        },
    ]
    .iter()
    .map(describe_sync)
    .collect();

    assert_eq!(lines, ["-", "no upstream", "ahead 2, behind 1"]);
}

#[test]
fn test_select_files_picks_named_files_only() {
    let entries = select_files(PATCH, "p.diff", &[select("src/lib.rs=2")]).unwrap();

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.file.display_path(), "src/lib.rs");
    assert!(entry.selection.is_selected(2));
    assert!(!entry.selection.is_selected(1));
    assert_eq!(
        entry.selection.selection_type(&entry.file),
        SelectionType::Partial
    );
}

#[test]
fn test_select_files_all_keyword() {
    let entries = select_files(
        PATCH,
        "p.diff",
        &[select("notes.txt=all"), select("src/lib.rs=1,2")],
    )
    .unwrap();

    let types: Vec<_> = entries
        .iter()
        .map(|e| (e.file.display_path(), e.selection.selection_type(&e.file)))
        .collect();
    assert_eq!(
        types,
        [
            ("src/lib.rs", SelectionType::All),
            ("notes.txt", SelectionType::All)
        ]
    );
}

#[test]
fn test_select_files_errors() {
    let unknown = select_files(PATCH, "p.diff", &[select("missing.rs=1")]).unwrap_err();
    let empty = select_files("not a diff\n", "empty.diff", &[]).unwrap_err();

    insta::assert_snapshot!(format!("{unknown}\n{empty}"), @r"
    no file 'missing.rs' in patch 'p.diff'
    no file sections found in diff 'empty.diff'
    ");
}
