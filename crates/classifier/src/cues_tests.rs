// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    fastapi_call = { "app = FastAPI()\n" },
    flask_call = { "app = Flask(__name__)\n" },
    starlette_call = { "app = Starlette()\n" },
    uvicorn_run = { "def main():\n    uvicorn.run(app, port=8080)\n" },
    commented_fastapi = { "# app = FastAPI()\n" },
)]
fn detects_http_cues(source: &str) {
    assert!(has_http_server(source));
}

#[test]
fn app_assignment_regex_matches_without_space_before_paren() {
    assert!(has_http_server("app=FastAPI()\n"));
}

#[test]
fn no_http_cue_in_plain_handler() {
    assert!(!has_http_server("def handler(x):\n    return x\n"));
}

#[test]
fn agent_class_with_run_method_detected() {
    let src = "class MyAgent:\n    def setup(self):\n        pass\n    def run(self, x):\n        return x\n";
    assert!(has_agent_class(src));
}

#[test]
fn agent_class_with_call_method_detected() {
    let src = "class Agent:\n    def __call__(self, x):\n        return x\n";
    assert!(has_agent_class(src));
}

#[test]
fn class_named_agent_without_run_method_is_not_detected() {
    let src = "class MyAgent:\n    def setup(self):\n        pass\n";
    assert!(!has_agent_class(src));
}

#[test]
fn class_not_named_agent_is_ignored() {
    let src = "class Worker:\n    def run(self, x):\n        return x\n";
    assert!(!has_agent_class(src));
}

#[test]
fn indented_class_is_not_module_level() {
    let src = "def outer():\n    class NestedAgent:\n        def run(self, x):\n            return x\n";
    assert!(!has_agent_class(src));
}

#[test]
fn method_scan_stops_at_next_top_level_construct() {
    let src = "class MyAgent:\n    def setup(self):\n        pass\n\ndef run(x):\n    return x\n";
    // `run` here belongs to a later module-level function, not MyAgent's body.
    assert!(!has_agent_class(src));
    assert!(has_handler_function(src));
}

#[yare::parameterized(
    handler = { "def handler(x):\n    return x\n" },
    main_fn = { "def main(x):\n    return x\n" },
    async_invoke = { "async def invoke(x):\n    return x\n" },
    run_fn = { "def run(x):\n    return x\n" },
)]
fn detects_handler_function_names(source: &str) {
    assert!(has_handler_function(source));
}

#[test]
fn handler_name_inside_indented_block_is_not_module_level() {
    let src = "class Foo:\n    def handler(self, x):\n        return x\n";
    assert!(!has_handler_function(src));
}

#[test]
fn unrelated_function_name_is_not_a_handler_cue() {
    assert!(!has_handler_function("def compute(x):\n    return x\n"));
}
