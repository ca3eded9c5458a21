//! Workspace-level integration tests for fibserve. See `tests/`.
