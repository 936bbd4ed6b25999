pub(crate) const ARGUMENT_TAG: &str = "@argument";
pub(crate) const OPTION_TAG: &str = "@option";
pub(crate) const REST_TAG: &str = "@rest";
pub(crate) const VALUES_TAG: &str = "@values";
pub(crate) const TYPE_TAG: &str = "@var";
pub(crate) const END_OF_OPTIONS: &str = "--";
pub(crate) const DEFAULT_KIND: &str = "string";
