pub(crate) mod layout;
pub(crate) mod shaping;
pub(crate) mod wrap;
