/// Three-state update for optional task fields.
///
/// - `NoChange`: field keeps its existing value
/// - `Set(value)`: field is updated to the provided value
/// - `Clear`: field is cleared (set to None)
///
/// # Example
///
/// ```
/// use nest_domain::FieldUpdate;
///
/// let mut description = Some("call the plumber".to_string());
/// FieldUpdate::Set("call the electrician".to_string()).apply_to(&mut description);
/// assert_eq!(description.as_deref(), Some("call the electrician"));
///
/// FieldUpdate::Clear.apply_to(&mut description);
/// assert_eq!(description, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }
}
