pub(crate) mod messages;
pub(crate) mod presence;
pub(crate) mod readline;
