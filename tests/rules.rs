use std::fs;

use exprewrite::{
    config::Config,
    interpreter::{context::ParsingContext, rewrite::parse_rulesets},
};
use walkdir::WalkDir;

#[test]
fn shipped_rule_files_load() {
    let ctx = ParsingContext::arithmetic(Config::default());
    let mut count = 0;

    for entry in
        WalkDir::new("rules").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "rules"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let loaded = parse_rulesets(&ctx, &content);
        if let Some(error) = loaded.errors.first() {
            panic!("Rule file {path:?} failed:\n{error}");
        }
        assert!(loaded.rulesets.iter().all(|r| !r.is_empty()),
                "Rule file {path:?} has an empty ruleset");
        count += 1;
    }

    assert!(count > 0, "No rule files found in rules/");
}
