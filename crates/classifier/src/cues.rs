// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexical cue detection per launch shape (spec §4.2).

use regex::Regex;
use std::sync::OnceLock;

const HTTP_SUBSTRINGS: &[&str] =
    &["FastAPI(", "Flask(", "Starlette(", "uvicorn.run(", "app = FastAPI", "app = Flask"];

const HANDLER_NAMES: &[&str] = &["handler", "main", "invoke", "run"];
const AGENT_METHOD_NAMES: &[&str] = &["run", "invoke", "__call__"];

fn app_assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^app\s*=\s*(FastAPI|Flask|Starlette)\s*\(").unwrap()
    })
}

fn class_def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^class\s+(\w+)\s*(\(|:)").unwrap()
    })
}

fn method_def_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^\s+(async\s+)?def\s+(\w+)\s*\(").unwrap()
    })
}

fn module_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^(async\s+)?def\s+(\w+)\s*\(").unwrap()
    })
}

/// A line counts as "module level" when it has no leading whitespace — the
/// convention this crate relies on instead of tracking real indentation
/// blocks, per the design note's "light lexical prefilter" option.
fn is_top_level(line: &str) -> bool {
    !line.is_empty() && !line.starts_with(' ') && !line.starts_with('\t')
}

pub fn has_http_server(source: &str) -> bool {
    if HTTP_SUBSTRINGS.iter().any(|pat| source.contains(pat)) {
        return true;
    }
    source.lines().map(str::trim_start).any(|line| app_assignment_re().is_match(line))
}

pub fn has_agent_class(source: &str) -> bool {
    let lines: Vec<&str> = source.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if is_top_level(line) {
            if let Some(caps) = class_def_re().captures(line) {
                let name = &caps[1];
                if name.contains("Agent") && class_defines_agent_method(&lines, i + 1) {
                    return true;
                }
            }
        }
        i += 1;
    }
    false
}

/// Scan the indented body of a class starting at `start` for one of the
/// recognized instance-method names, stopping at the next top-level line.
fn class_defines_agent_method(lines: &[&str], start: usize) -> bool {
    for line in lines.iter().skip(start) {
        if is_top_level(line) {
            break;
        }
        if let Some(caps) = method_def_re().captures(line) {
            let name = &caps[2];
            if AGENT_METHOD_NAMES.contains(&name) {
                return true;
            }
        }
    }
    false
}

pub fn has_handler_function(source: &str) -> bool {
    source.lines().filter(|l| is_top_level(l)).any(|line| {
        module_fn_re().captures(line).is_some_and(|caps| HANDLER_NAMES.contains(&&caps[2]))
    })
}

#[cfg(test)]
#[path = "cues_tests.rs"]
mod tests;
