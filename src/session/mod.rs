pub(crate) mod editor_session;
