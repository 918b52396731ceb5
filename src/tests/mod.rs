mod allocator_tests;
mod group_tests;
mod planner_tests;

use crate::core::models::{Group, User};
use crate::core::service::LedgerService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> LedgerService<InMemoryStorage> {
    LedgerService::new(InMemoryStorage::new())
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();
}

pub async fn test_user(service: &LedgerService<InMemoryStorage>, name: &str) -> User {
    service
        .create_user(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
        )
        .await
        .unwrap()
}

/// Create a group whose first listed user is the creator; the creator then
/// adds the rest.
pub async fn test_group(
    service: &LedgerService<InMemoryStorage>,
    name: &str,
    users: &[&User],
) -> Group {
    let creator = users[0];
    let mut group = service
        .create_group(name.to_string(), creator.id)
        .await
        .unwrap();
    for user in &users[1..] {
        group = service
            .add_member(group.id, user.id, creator.id)
            .await
            .unwrap();
    }
    group
}
