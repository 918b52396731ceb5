use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::tests::{create_test_service, init_tracing, test_user};

#[tokio::test]
async fn test_create_group_makes_creator_first_member() {
    init_tracing();
    let service = create_test_service();
    let alice = test_user(&service, "Alice").await;

    let group = service
        .create_group("Trip".to_string(), alice.id)
        .await
        .unwrap();

    assert_eq!(group.name, "Trip");
    assert_eq!(group.created_by, alice.id);
    assert_eq!(group.members, vec![alice.id]);
}

#[tokio::test]
async fn test_add_member_keeps_members_sorted() {
    let service = create_test_service();
    let alice = test_user(&service, "Alice").await;
    let bob = test_user(&service, "Bob").await;
    let carol = test_user(&service, "Carol").await;

    let group = service
        .create_group("Trip".to_string(), alice.id)
        .await
        .unwrap();
    service.add_member(group.id, bob.id, alice.id).await.unwrap();
    let group = service
        .add_member(group.id, carol.id, alice.id)
        .await
        .unwrap();

    assert_eq!(group.members.len(), 3);
    let mut sorted = group.members.clone();
    sorted.sort();
    assert_eq!(group.members, sorted);
    assert!(group.is_member(bob.id));
    assert!(group.is_member(carol.id));
}

#[tokio::test]
async fn test_add_member_rejects_duplicates() {
    let service = create_test_service();
    let alice = test_user(&service, "Alice").await;
    let bob = test_user(&service, "Bob").await;

    let group = service
        .create_group("Trip".to_string(), alice.id)
        .await
        .unwrap();
    service.add_member(group.id, bob.id, alice.id).await.unwrap();

    let result = service.add_member(group.id, bob.id, alice.id).await;
    assert!(matches!(result, Err(LedgerError::AlreadyGroupMember(id)) if id == bob.id));
}

#[tokio::test]
async fn test_add_member_requires_member_adder() {
    let service = create_test_service();
    let alice = test_user(&service, "Alice").await;
    let bob = test_user(&service, "Bob").await;
    let mallory = test_user(&service, "Mallory").await;

    let group = service
        .create_group("Trip".to_string(), alice.id)
        .await
        .unwrap();

    let result = service.add_member(group.id, bob.id, mallory.id).await;
    assert!(matches!(result, Err(LedgerError::NotGroupMember(id)) if id == mallory.id));
}

#[tokio::test]
async fn test_add_member_requires_known_user() {
    let service = create_test_service();
    let alice = test_user(&service, "Alice").await;

    let group = service
        .create_group("Trip".to_string(), alice.id)
        .await
        .unwrap();

    let ghost = Uuid::new_v4();
    let result = service.add_member(group.id, ghost, alice.id).await;
    assert!(matches!(result, Err(LedgerError::UserNotFound(id)) if id == ghost));
}

#[tokio::test]
async fn test_groups_for_user_lists_memberships() {
    let service = create_test_service();
    let alice = test_user(&service, "Alice").await;
    let bob = test_user(&service, "Bob").await;

    let trip = service
        .create_group("Trip".to_string(), alice.id)
        .await
        .unwrap();
    service
        .create_group("Flat".to_string(), bob.id)
        .await
        .unwrap();
    let shared = service
        .create_group("Dinner club".to_string(), bob.id)
        .await
        .unwrap();
    service
        .add_member(shared.id, alice.id, bob.id)
        .await
        .unwrap();

    let groups = service.groups_for_user(alice.id).await.unwrap();
    let ids: Vec<Uuid> = groups.iter().map(|g| g.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&trip.id));
    assert!(ids.contains(&shared.id));
}

#[tokio::test]
async fn test_create_user_rejects_bad_input() {
    let service = create_test_service();

    let result = service
        .create_user("  ".to_string(), "alice@example.com".to_string())
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "name"));

    let result = service
        .create_user("Alice".to_string(), "not-an-email".to_string())
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidEmail(_))));
}
