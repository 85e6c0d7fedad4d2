pub(crate) mod session_context;
