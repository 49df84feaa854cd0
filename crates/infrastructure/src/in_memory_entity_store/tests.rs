use chrono::Weekday;

use mentor_application::{ListQuery, PageSpec, UnitOfWork, UnitOfWorkFactory};
use mentor_core::{AppError, ReasonCode};
use mentor_domain::{
    GroupWeekendDraft, GroupWeekendSortField, Permission, PermissionDraft, Role, RoleDraft,
    RoleId, RoleSortField, User, UserDraft, UserId, UserSortField,
};

use super::InMemoryEntityStore;

async fn begin(store: &InMemoryEntityStore) -> Box<dyn UnitOfWork> {
    store
        .begin()
        .await
        .unwrap_or_else(|_| panic!("unit should begin"))
}

async fn seed_permission(unit: &mut dyn UnitOfWork, name: &str) -> Permission {
    let draft = PermissionDraft::new(name).unwrap_or_else(|_| panic!("draft should be valid"));
    unit.permissions()
        .insert(draft)
        .await
        .unwrap_or_else(|_| panic!("permission should insert"))
}

async fn seed_role(unit: &mut dyn UnitOfWork, name: &str, permissions: Vec<Permission>) -> Role {
    let draft =
        RoleDraft::new(name, permissions).unwrap_or_else(|_| panic!("draft should be valid"));
    unit.roles()
        .insert(draft)
        .await
        .unwrap_or_else(|_| panic!("role should insert"))
}

async fn seed_user(unit: &mut dyn UnitOfWork, first_name: &str, role: Option<Role>) -> User {
    let draft = UserDraft::new(first_name, "Petrova", role, Vec::new())
        .unwrap_or_else(|_| panic!("draft should be valid"));
    unit.users()
        .insert(draft)
        .await
        .unwrap_or_else(|_| panic!("user should insert"))
}

async fn find_user(store: &InMemoryEntityStore, user_id: UserId) -> Option<User> {
    let mut unit = begin(store).await;
    unit.users()
        .find_by_id(user_id)
        .await
        .unwrap_or_else(|_| panic!("lookup should succeed"))
}

#[tokio::test]
async fn committed_writes_are_visible_to_later_units() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    let user = seed_user(unit.as_mut(), "Ana", None).await;
    assert!(unit.commit().await.is_ok());

    assert_eq!(find_user(&store, user.id()).await, Some(user));
}

#[tokio::test]
async fn rolled_back_writes_vanish_and_identifiers_are_not_reused() {
    let store = InMemoryEntityStore::new();

    let mut discarded = begin(&store).await;
    let first = seed_user(discarded.as_mut(), "Ana", None).await;
    assert!(discarded.rollback().await.is_ok());

    let mut dropped = begin(&store).await;
    let second = seed_user(dropped.as_mut(), "Boris", None).await;
    drop(dropped);

    let mut kept = begin(&store).await;
    let third = seed_user(kept.as_mut(), "Vera", None).await;
    assert!(kept.commit().await.is_ok());

    assert!(find_user(&store, first.id()).await.is_none());
    assert!(find_user(&store, second.id()).await.is_none());
    assert_ne!(third.id(), first.id());
    assert_ne!(third.id(), second.id());
}

#[tokio::test]
async fn role_names_are_unique() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    let _ = seed_role(unit.as_mut(), "Mentor", Vec::new()).await;

    let draft = RoleDraft::new("Mentor", Vec::new())
        .unwrap_or_else(|_| panic!("draft should be valid"));
    let result = unit.roles().insert(draft).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest {
            reason: ReasonCode::RoleNameTaken,
            ..
        })
    ));
}

#[tokio::test]
async fn writes_referencing_missing_rows_are_rejected() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    let ghost = Role::new(RoleId::new(50), "Ghost", Vec::new())
        .unwrap_or_else(|_| panic!("role should be valid"));
    let draft = UserDraft::new("Ana", "Petrova", Some(ghost), Vec::new())
        .unwrap_or_else(|_| panic!("draft should be valid"));

    let result = unit.users().insert(draft).await;

    assert!(matches!(
        result,
        Err(AppError::Conflict {
            reason: ReasonCode::DanglingReference,
            ..
        })
    ));
}

#[tokio::test]
async fn users_see_current_role_permissions() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    let read = seed_permission(unit.as_mut(), "user.read").await;
    let mut role = seed_role(unit.as_mut(), "Mentor", Vec::new()).await;
    let user = seed_user(unit.as_mut(), "Ana", Some(role.clone())).await;

    role.add_permission(read.clone());
    let _ = unit.roles().update(&role).await;
    let fetched = unit
        .users()
        .find_by_id(user.id())
        .await
        .unwrap_or_else(|_| panic!("lookup should succeed"))
        .unwrap_or_else(|| panic!("user should exist"));

    let role_permissions = fetched.role().map(Role::permissions).unwrap_or_default();
    assert_eq!(role_permissions, &[read][..]);
}

#[tokio::test]
async fn deleting_a_role_nulls_user_references() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    let role = seed_role(unit.as_mut(), "Mentor", Vec::new()).await;
    let user = seed_user(unit.as_mut(), "Ana", Some(role.clone())).await;

    let deleted = unit.roles().delete_by_id(role.id()).await;
    let deleted_again = unit.roles().delete_by_id(role.id()).await;
    assert!(unit.commit().await.is_ok());

    assert!(matches!(deleted, Ok(true)));
    assert!(matches!(deleted_again, Ok(false)));
    let stored = find_user(&store, user.id())
        .await
        .unwrap_or_else(|| panic!("user should survive"));
    assert!(stored.role().is_none());
}

#[tokio::test]
async fn clear_role_reports_detached_users() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    let role = seed_role(unit.as_mut(), "Mentor", Vec::new()).await;
    let _ = seed_user(unit.as_mut(), "Ana", Some(role.clone())).await;
    let _ = seed_user(unit.as_mut(), "Boris", Some(role.clone())).await;
    let _ = seed_user(unit.as_mut(), "Vera", None).await;

    let cleared = unit.users().clear_role(role.id()).await;

    assert!(matches!(cleared, Ok(2)));
}

#[tokio::test]
async fn deleting_a_permission_removes_its_associations() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    let read = seed_permission(unit.as_mut(), "user.read").await;
    let role = seed_role(unit.as_mut(), "Mentor", vec![read.clone()]).await;

    let _ = unit.permissions().delete_by_id(read.id()).await;
    let fetched = unit
        .roles()
        .find_by_id(role.id())
        .await
        .unwrap_or_else(|_| panic!("lookup should succeed"))
        .unwrap_or_else(|| panic!("role should exist"));

    assert!(fetched.permissions().is_empty());
}

#[tokio::test]
async fn listing_applies_sort_and_window() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    for name in ["Vera", "Ana", "Boris"] {
        let _ = seed_user(unit.as_mut(), name, None).await;
    }
    let query = ListQuery {
        page: 1,
        size: Some(2),
        sort_by: Some("first_name".to_owned()),
    };
    let spec = PageSpec::<UserSortField>::resolve(&query, 10, UserSortField::Id)
        .unwrap_or_else(|_| panic!("query should resolve"));

    let page = unit
        .users()
        .find_all(spec)
        .await
        .unwrap_or_else(|_| panic!("listing should succeed"));

    assert_eq!(page.total_elements(), 3);
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].first_name().as_str(), "Vera");
}

#[tokio::test]
async fn group_weekends_round_trip_through_the_store() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    let draft =
        GroupWeekendDraft::new(4, Weekday::Sat).unwrap_or_else(|_| panic!("draft should be valid"));

    let inserted = unit
        .group_weekends()
        .insert(draft)
        .await
        .unwrap_or_else(|_| panic!("row should insert"));
    let listed = unit
        .group_weekends()
        .find_all(PageSpec::Unpaged {
            sort: GroupWeekendSortField::GroupId,
        })
        .await
        .unwrap_or_else(|_| panic!("listing should succeed"));
    let removed = unit.group_weekends().delete_by_id(inserted.id()).await;

    assert_eq!(listed.items(), &[inserted][..]);
    assert_eq!(inserted.weekend(), Weekday::Sat);
    assert!(matches!(removed, Ok(true)));
}

#[tokio::test]
async fn role_listing_is_sorted_by_name() {
    let store = InMemoryEntityStore::new();
    let mut unit = begin(&store).await;
    for name in ["Student", "Admin", "Mentor"] {
        let _ = seed_role(unit.as_mut(), name, Vec::new()).await;
    }

    let page = unit
        .roles()
        .find_all(PageSpec::Unpaged {
            sort: RoleSortField::Name,
        })
        .await
        .unwrap_or_else(|_| panic!("listing should succeed"));

    let names: Vec<&str> = page.items().iter().map(|role| role.name().as_str()).collect();
    assert_eq!(names, vec!["Admin", "Mentor", "Student"]);
}
