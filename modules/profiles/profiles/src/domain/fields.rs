/// Form field names, as used in validation errors.
pub struct FormFields;

impl FormFields {
    pub const FIRST_NAME: &'static str = "firstName";
    pub const LAST_NAME: &'static str = "lastName";
    pub const AGE: &'static str = "age";
}
