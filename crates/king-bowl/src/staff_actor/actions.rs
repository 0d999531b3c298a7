/// Custom actions for staff members.
#[derive(Debug, Clone)]
pub enum StaffAction {
    /// Replaces the PIN after checking the current one.
    ChangePin { current: String, new: String },
}
