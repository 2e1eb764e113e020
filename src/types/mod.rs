pub mod forms;

pub use forms::{DashboardAction, DashboardForm, JoinForm, LoginForm, QueueForm, RegistrationForm};
