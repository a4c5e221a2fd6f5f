pub use super::apartment::Entity as Apartment;
pub use super::building::Entity as Building;
pub use super::expense::Entity as Expense;
pub use super::notification::Entity as Notification;
pub use super::payment::Entity as Payment;
pub use super::subscription::Entity as Subscription;
pub use super::super_admin::Entity as SuperAdmin;
pub use super::user::Entity as User;
