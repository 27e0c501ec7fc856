// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-recipe synthesis: the `Dockerfile` and wrapper script written into
//! an agent's workspace before the image is built (spec §6).

use oken_core::{AgentConfig, EntrypointType};

const WRAPPER_FILENAME: &str = "_oken_wrapper.py";

/// Render the `Dockerfile` for `config`, branching the launch command on
/// `entry_type` (handler/agent run the wrapper, http runs the user's own
/// entrypoint directly).
pub fn render_dockerfile(config: &AgentConfig, entry_type: EntrypointType, container_port: u16) -> String {
    let deps_install = format!(
        "\n# install the requested interpreter\nRUN uv python install {version}\n\n\
         # dependency manifests first, for layer caching\n\
         COPY pyproject.toml* uv.lock* requirements.txt* ./\n\
         RUN if [ -f pyproject.toml ]; then \\\n\
         \t\tuv sync --frozen 2>/dev/null || uv sync; \\\n\
         \telif [ -f requirements.txt ]; then \\\n\
         \t\tuv init --python {version} && uv add -r requirements.txt; \\\n\
         \telse \\\n\
         \t\tuv init --python {version}; \\\n\
         \tfi\n",
        version = config.python_version,
    );

    let cmd = match entry_type {
        EntrypointType::Http => format!("CMD [\"uv\", \"run\", \"python\", \"{}\"]", config.entrypoint),
        EntrypointType::Handler | EntrypointType::Agent => {
            format!("CMD [\"uv\", \"run\", \"python\", \"{WRAPPER_FILENAME}\"]")
        }
    };

    let env_vars = format!(
        "\nENV OKEN_ENTRYPOINT=\"{}\"\nENV OKEN_ENTRY_TYPE=\"{}\"\nENV PORT=\"{container_port}\"\n",
        config.entrypoint,
        entry_type.as_str(),
    );

    format!(
        "FROM ghcr.io/astral-sh/uv:bookworm-slim\n\n\
         WORKDIR /app\n\
         {deps_install}\n\
         # application code\n\
         COPY . .\n\
         {env_vars}\n\
         EXPOSE {container_port}\n\
         {cmd}\n"
    )
}

/// Path (relative to the workspace root) the wrapper is written to, when
/// `entry_type` needs one.
pub fn wrapper_filename() -> &'static str {
    WRAPPER_FILENAME
}

/// Render the FastAPI/uvicorn wrapper that hosts `POST /invoke` and
/// `GET /health` in front of a handler function or an agent class.
///
/// Only handler/agent shapes need this; the http shape is the user's own
/// server and gets no wrapper.
pub fn render_wrapper() -> &'static str {
    r#"import asyncio
import importlib.util
import os
import sys

from fastapi import FastAPI
import uvicorn

app = FastAPI()

ENTRYPOINT = os.environ.get("OKEN_ENTRYPOINT", "main.py")
ENTRY_TYPE = os.environ.get("OKEN_ENTRY_TYPE", "handler")

module_path = f"/app/{ENTRYPOINT}"
spec = importlib.util.spec_from_file_location("agent_module", module_path)
module = importlib.util.module_from_spec(spec)
sys.modules["agent_module"] = module
spec.loader.exec_module(module)

if ENTRY_TYPE == "handler":
    handler_fn = getattr(module, "handler", None) or getattr(module, "main", None)
    if handler_fn is None:
        raise RuntimeError(f"no handler or main function found in {ENTRYPOINT}")

    @app.post("/invoke")
    async def invoke(request: dict):
        result = handler_fn(request.get("input", {}))
        if asyncio.iscoroutine(result):
            result = await result
        return {"output": result}

elif ENTRY_TYPE == "agent":
    agent_cls = next(
        (v for k, v in vars(module).items() if isinstance(v, type) and "Agent" in k),
        None,
    )
    if agent_cls is None:
        raise RuntimeError(f"no Agent class found in {ENTRYPOINT}")
    instance = agent_cls()
    if hasattr(instance, "setup"):
        setup_result = instance.setup()
        if asyncio.iscoroutine(setup_result):
            asyncio.get_event_loop().run_until_complete(setup_result)

    @app.post("/invoke")
    async def invoke(request: dict):
        result = instance.run(request.get("input", {}))
        if asyncio.iscoroutine(result):
            result = await result
        return {"output": result}


@app.get("/health")
async def health():
    return {"status": "ok"}


if __name__ == "__main__":
    port = int(os.environ.get("PORT", "8080"))
    uvicorn.run(app, host="0.0.0.0", port=port)
"#
}

#[cfg(test)]
#[path = "recipe_tests.rs"]
mod tests;
