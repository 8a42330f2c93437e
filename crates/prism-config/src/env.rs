use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// An unset variable is an error unless the placeholder carries a
/// fallback via `{{ env.VAR | default("fallback") }}`. Expansion runs
/// on the raw text before deserialization, so settings structs hold
/// plain strings. Lines starting with `#` (TOML comments) are passed
/// through unchanged.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#)
                .expect("must be valid regex")
        })
    }

    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut result = String::with_capacity(line.len());
        let mut last_end = 0;

        for captures in re().captures_iter(line) {
            let overall = captures.get(0).expect("match always has a full capture");
            let var_name = captures.get(1).expect("regex has a name group").as_str();
            let fallback = captures.get(2).map(|m| m.as_str());

            result.push_str(&line[last_end..overall.start()]);

            match (std::env::var(var_name), fallback) {
                (Ok(value), _) => result.push_str(&value),
                (Err(_), Some(fallback)) => result.push_str(fallback),
                (Err(_), None) => {
                    return Err(format!("environment variable not found: `{var_name}`"));
                }
            }

            last_end = overall.end();
        }

        result.push_str(&line[last_end..]);
        output.push_str(&result);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
