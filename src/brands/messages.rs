//! Messages the Brands service is known to return.

pub const NOT_FOUND: &str = "Requested item not found";
pub const METHOD_NOT_ALLOWED: &str = "Method is not allowed for the requested route";

pub const SLUG_TAKEN: &str = "A brand already exists with this slug.";
pub const SLUG_CHARSET: &str =
    "The slug field must only contain letters, numbers, dashes, and underscores.";
pub const SLUG_NOT_STRING: &str = "The slug field must be a string.";
pub const SLUG_REQUIRED: &str = "The slug field is required.";

pub const NAME_NOT_STRING: &str = "The name field must be a string.";
pub const NAME_REQUIRED: &str = "The name field is required.";
pub const NAME_TOO_LONG: &str = "The name field must not be greater than 120 characters.";

pub const NAME_MAX_CHARS: usize = 120;
