use crate::engine::matcher::{match_node, MatchOutcome};
use crate::engine::parser::parse_mind_map;
use crate::engine::scanner::scan_folder;
use crate::engine::types::{MindMapFile, MindMapNode, SearchOptions, SearchResult};
use chrono::{DateTime, Local};
use log::{debug, warn};
use std::fs;

/// Run one search: scan the root folder, parse each candidate file, match
/// every element, and accumulate results in scanner order.
///
/// Per-file failures are logged and skipped; they never abort the batch.
pub fn search(options: &SearchOptions) -> Vec<SearchResult> {
    let min_len = options.min_query_len.max(1);
    if options.query.chars().count() < min_len || options.root_folder.as_os_str().is_empty() {
        debug!("nothing to search: query or root folder not set");
        return Vec::new();
    }

    let query_lower = options.query.to_lowercase();
    let files = scan_folder(&options.root_folder, options.include_subfolders);
    let mut results = Vec::new();

    for file in &files {
        let bytes = match fs::read(&file.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("skipping unreadable file {:?}: {}", file.path, e);
                continue;
            }
        };

        let root = match parse_mind_map(&bytes) {
            Ok(root) => root,
            Err(e) => {
                warn!("skipping malformed file {:?}: {}", file.path, e);
                continue;
            }
        };

        collect_matches(file, &root, &query_lower, options.search_notes, &mut results);
    }

    debug!("{} results for {:?}", results.len(), options.query);
    results
}

/// Walk the element tree iteratively in document order and append one result
/// per matching node.
fn collect_matches(
    file: &MindMapFile,
    root: &MindMapNode,
    query_lower: &str,
    search_notes: bool,
    results: &mut Vec<SearchResult>,
) {
    let last_modified = format_modified(file);

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match match_node(node, query_lower, search_notes) {
            MatchOutcome::Text(text) => {
                results.push(make_result(file, text, &last_modified, false));
            }
            MatchOutcome::Note(excerpt) => {
                results.push(make_result(
                    file,
                    format!("Note: {}", excerpt),
                    &last_modified,
                    true,
                ));
            }
            MatchOutcome::None => {}
        }
        // Reversed push keeps the pop order equal to document order
        for child in node.children.iter().rev() {
            stack.push(child);
        }
    }
}

fn make_result(
    file: &MindMapFile,
    display_text: String,
    last_modified: &str,
    is_note: bool,
) -> SearchResult {
    SearchResult {
        file_name: file.name.clone(),
        rel_path: file.rel_path.clone(),
        display_text,
        last_modified: last_modified.to_string(),
        is_note,
    }
}

fn format_modified(file: &MindMapFile) -> String {
    DateTime::<Local>::from(file.modified)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn write_map(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("<map version=\"1.0.1\">{}</map>", body)).unwrap();
        path
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(time).unwrap();
    }

    fn options(query: &str, root: &Path) -> SearchOptions {
        SearchOptions::new(query, root)
    }

    #[test]
    fn test_two_file_scenario_with_notes() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_map(temp_dir.path(), "a.mm", r#"<node TEXT="Project Plan"/>"#);
        let b = write_map(
            temp_dir.path(),
            "b.mm",
            r#"<node TEXT="plan review"/>
               <node TEXT="other">
                 <richcontent TYPE="NOTE"><html><body>urgent plan</body></html></richcontent>
               </node>"#,
        );
        let now = SystemTime::now();
        set_mtime(&a, now);
        set_mtime(&b, now - Duration::from_secs(60));

        let mut opts = options("plan", temp_dir.path());
        opts.search_notes = true;
        let results = search(&opts);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].file_name, "a.mm");
        assert_eq!(results[0].display_text, "Project Plan");
        assert!(!results[0].is_note);
        assert_eq!(results[1].file_name, "b.mm");
        assert_eq!(results[1].display_text, "plan review");
        assert!(!results[1].is_note);
        assert_eq!(results[2].file_name, "b.mm");
        assert!(results[2].display_text.starts_with("Note: "));
        assert!(results[2].display_text.contains("urgent plan"));
        assert!(results[2].is_note);
    }

    #[test]
    fn test_note_match_suppresses_text_match_for_same_node() {
        let temp_dir = TempDir::new().unwrap();
        write_map(
            temp_dir.path(),
            "both.mm",
            r#"<node TEXT="plan text">
                 <richcontent TYPE="NOTE"><html><body>plan note</body></html></richcontent>
               </node>"#,
        );

        let mut opts = options("plan", temp_dir.path());
        opts.search_notes = true;
        let results = search(&opts);

        assert_eq!(results.len(), 1);
        assert!(results[0].is_note);
    }

    #[test]
    fn test_notes_not_searched_by_default() {
        let temp_dir = TempDir::new().unwrap();
        write_map(
            temp_dir.path(),
            "m.mm",
            r#"<node TEXT="alpha">
                 <richcontent TYPE="NOTE"><html><body>beta</body></html></richcontent>
               </node>"#,
        );

        let results = search(&options("beta", temp_dir.path()));
        assert!(results.is_empty());
    }

    #[test]
    fn test_malformed_file_is_skipped_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let good_a = write_map(temp_dir.path(), "good_a.mm", r#"<node TEXT="plan a"/>"#);
        let good_b = write_map(temp_dir.path(), "good_b.mm", r#"<node TEXT="plan b"/>"#);
        let bad = temp_dir.path().join("bad.mm");
        fs::write(&bad, "<map><node TEXT=\"plan c\"></map>").unwrap();
        let now = SystemTime::now();
        set_mtime(&good_a, now);
        set_mtime(&bad, now - Duration::from_secs(30));
        set_mtime(&good_b, now - Duration::from_secs(60));

        let results = search(&options("plan", temp_dir.path()));

        let names: Vec<&str> = results.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, ["good_a.mm", "good_b.mm"]);
    }

    #[test]
    fn test_nbsp_file_parses_and_matches() {
        let temp_dir = TempDir::new().unwrap();
        write_map(temp_dir.path(), "n.mm", "<node TEXT=\"big&nbsp;plan\"/>");

        let results = search(&options("big plan", temp_dir.path()));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_text, "big plan");
    }

    #[test]
    fn test_empty_folder_yields_empty_results() {
        let temp_dir = TempDir::new().unwrap();
        assert!(search(&options("plan", temp_dir.path())).is_empty());
    }

    #[test]
    fn test_empty_query_short_circuits() {
        let temp_dir = TempDir::new().unwrap();
        write_map(temp_dir.path(), "m.mm", r#"<node TEXT="anything"/>"#);

        assert!(search(&options("", temp_dir.path())).is_empty());
    }

    #[test]
    fn test_min_query_len_is_enforced() {
        let temp_dir = TempDir::new().unwrap();
        write_map(temp_dir.path(), "m.mm", r#"<node TEXT="a"/>"#);

        let mut opts = options("a", temp_dir.path());
        opts.min_query_len = 2;
        assert!(search(&opts).is_empty());

        opts.query = "aa".to_string();
        write_map(temp_dir.path(), "m2.mm", r#"<node TEXT="aa"/>"#);
        assert_eq!(search(&opts).len(), 1);
    }

    #[test]
    fn test_unset_root_folder_short_circuits() {
        let opts = options("plan", Path::new(""));
        assert!(search(&opts).is_empty());
    }

    #[test]
    fn test_subfolder_results_carry_relative_path() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("archive");
        fs::create_dir(&sub).unwrap();
        write_map(&sub, "deep.mm", r#"<node TEXT="buried plan"/>"#);

        let mut opts = options("plan", temp_dir.path());
        opts.include_subfolders = true;
        let results = search(&opts);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].rel_path, Path::new("archive").join("deep.mm"));
        assert_eq!(results[0].file_name, "deep.mm");
    }

    #[test]
    fn test_results_follow_file_mtime_order() {
        let temp_dir = TempDir::new().unwrap();
        let now = SystemTime::now();
        // t1 newest, t3 oldest; creation order deliberately shuffled
        for (name, age) in [("t3.mm", 300u64), ("t1.mm", 100), ("t2.mm", 200)] {
            let path = write_map(temp_dir.path(), name, r#"<node TEXT="plan"/>"#);
            set_mtime(&path, now - Duration::from_secs(age));
        }

        let results = search(&options("plan", temp_dir.path()));

        let names: Vec<&str> = results.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, ["t1.mm", "t2.mm", "t3.mm"]);
    }
}
