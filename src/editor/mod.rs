pub(crate) mod event;
pub(crate) mod history;
pub(crate) mod style;
pub(crate) mod transform;
