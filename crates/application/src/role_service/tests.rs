use std::sync::Arc;

use mentor_core::{AppError, ReasonCode};
use mentor_domain::{PermissionId, RoleId};

use crate::dto::{CreatePermissionCommand, CreateRoleCommand, CreateUserCommand};
use crate::pagination::{ListQuery, ListingDefaults};
use crate::test_support::{FakeStore, RecordingNotificationSender};
use crate::{PermissionService, UserService};

use super::RoleService;

struct Fixture {
    store: Arc<FakeStore>,
    roles: RoleService,
    permissions: PermissionService,
    users: UserService,
}

fn fixture() -> Fixture {
    let store = FakeStore::new();
    Fixture {
        roles: RoleService::new(store.clone(), ListingDefaults::default()),
        permissions: PermissionService::new(store.clone()),
        users: UserService::new(
            store.clone(),
            Arc::new(RecordingNotificationSender::default()),
            ListingDefaults::default(),
        ),
        store,
    }
}

fn role_command(name: &str) -> CreateRoleCommand {
    CreateRoleCommand {
        name: name.to_owned(),
        permission_ids: Vec::new(),
    }
}

async fn create_permission(fixture: &Fixture, name: &str) -> PermissionId {
    fixture
        .permissions
        .create_permission(CreatePermissionCommand {
            name: name.to_owned(),
        })
        .await
        .unwrap_or_else(|_| panic!("permission should be created"))
        .id
}

#[tokio::test]
async fn create_then_get_returns_the_same_role() {
    let fixture = fixture();
    let read = create_permission(&fixture, "user.read").await;

    let created = fixture
        .roles
        .create_role(CreateRoleCommand {
            name: "Mentor".to_owned(),
            permission_ids: vec![read],
        })
        .await
        .unwrap_or_else(|_| panic!("role should be created"));
    let fetched = fixture
        .roles
        .get_role_by_id(created.id)
        .await
        .unwrap_or_else(|_| panic!("role should be found"));

    assert_eq!(created, fetched);
    assert_eq!(fetched.permissions.len(), 1);
}

#[tokio::test]
async fn create_role_with_unknown_permission_persists_nothing() {
    let fixture = fixture();

    let result = fixture
        .roles
        .create_role(CreateRoleCommand {
            name: "Mentor".to_owned(),
            permission_ids: vec![PermissionId::new(404)],
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::NotFound {
            reason: ReasonCode::PermissionNotFound,
            ..
        })
    ));
    let listed = fixture
        .roles
        .get_all_roles(ListQuery::default())
        .await
        .unwrap_or_else(|_| panic!("roles should list"));
    assert_eq!(listed.total_elements(), 0);
    assert_eq!(fixture.store.rollbacks(), 1);
}

#[tokio::test]
async fn duplicate_role_name_is_rejected() {
    let fixture = fixture();
    let _ = fixture.roles.create_role(role_command("Mentor")).await;

    let result = fixture.roles.create_role(role_command("Mentor")).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest {
            reason: ReasonCode::RoleNameTaken,
            ..
        })
    ));
}

#[tokio::test]
async fn unknown_role_fails_with_role_not_found() {
    let fixture = fixture();

    let result = fixture.roles.get_role_by_id(RoleId::new(99)).await;

    let Err(error) = result else {
        panic!("missing role should fail");
    };
    assert_eq!(error.reason(), ReasonCode::RoleNotFound);
    assert_eq!(error.message(), "role was not found");
}

#[tokio::test]
async fn adding_a_permission_twice_keeps_one_reference() {
    let fixture = fixture();
    let read = create_permission(&fixture, "user.read").await;
    let role = fixture
        .roles
        .create_role(role_command("Mentor"))
        .await
        .unwrap_or_else(|_| panic!("role should be created"));

    let _ = fixture.roles.add_permission_to_role(role.id, read).await;
    let updated = fixture
        .roles
        .add_permission_to_role(role.id, read)
        .await
        .unwrap_or_else(|_| panic!("second grant should succeed"));

    let matching = updated
        .permissions
        .iter()
        .filter(|permission| permission.id == read)
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn removing_an_absent_permission_is_a_no_op() {
    let fixture = fixture();
    let read = create_permission(&fixture, "user.read").await;
    let role = fixture
        .roles
        .create_role(role_command("Mentor"))
        .await
        .unwrap_or_else(|_| panic!("role should be created"));

    let updated = fixture
        .roles
        .remove_permission_in_role(role.id, read)
        .await
        .unwrap_or_else(|_| panic!("revoking an absent permission should succeed"));

    assert!(updated.permissions.is_empty());
}

#[tokio::test]
async fn permission_association_requires_existing_rows() {
    let fixture = fixture();
    let role = fixture
        .roles
        .create_role(role_command("Mentor"))
        .await
        .unwrap_or_else(|_| panic!("role should be created"));

    let missing_permission = fixture
        .roles
        .add_permission_to_role(role.id, PermissionId::new(404))
        .await;
    let missing_role = fixture
        .roles
        .remove_permission_in_role(RoleId::new(404), PermissionId::new(1))
        .await;

    assert!(matches!(
        missing_permission,
        Err(AppError::NotFound {
            reason: ReasonCode::PermissionNotFound,
            ..
        })
    ));
    assert!(matches!(
        missing_role,
        Err(AppError::NotFound {
            reason: ReasonCode::RoleNotFound,
            ..
        })
    ));
}

#[tokio::test]
async fn role_permissions_are_listed_by_identifier() {
    let fixture = fixture();
    let write = create_permission(&fixture, "user.write").await;
    let read = create_permission(&fixture, "user.read").await;
    let role = fixture
        .roles
        .create_role(CreateRoleCommand {
            name: "Admin".to_owned(),
            permission_ids: vec![read, write],
        })
        .await
        .unwrap_or_else(|_| panic!("role should be created"));

    let permissions = fixture
        .roles
        .get_role_permissions(role.id)
        .await
        .unwrap_or_else(|_| panic!("permissions should list"));

    let ids: Vec<PermissionId> = permissions.iter().map(|permission| permission.id).collect();
    assert_eq!(ids, vec![write, read]);
}

#[tokio::test]
async fn listing_roles_sorts_by_name_then_identifier() {
    let fixture = fixture();
    for name in ["Student", "Admin", "Mentor"] {
        let _ = fixture.roles.create_role(role_command(name)).await;
    }

    let page = fixture
        .roles
        .get_all_roles(ListQuery {
            page: 1,
            size: Some(1),
            sort_by: Some("name".to_owned()),
        })
        .await
        .unwrap_or_else(|_| panic!("roles should list"));

    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].name, "Mentor");
    assert_eq!(page.total_pages(), 3);
}

#[tokio::test]
async fn removing_a_role_detaches_it_from_users() {
    let fixture = fixture();
    let role = fixture
        .roles
        .create_role(role_command("Mentor"))
        .await
        .unwrap_or_else(|_| panic!("role should be created"));
    let user = fixture
        .users
        .create_user(CreateUserCommand {
            first_name: "Ana".to_owned(),
            last_name: "Petrova".to_owned(),
            role_id: Some(role.id),
            permission_ids: Vec::new(),
        })
        .await
        .unwrap_or_else(|_| panic!("user should be created"));

    let removed = fixture
        .roles
        .remove_role(role.id)
        .await
        .unwrap_or_else(|_| panic!("role should be removed"));

    assert_eq!(removed.name, "Mentor");
    assert!(fixture.store.stored_role(role.id).await.is_none());
    let stored = fixture
        .store
        .stored_user(user.id)
        .await
        .unwrap_or_else(|| panic!("user should survive role removal"));
    assert!(stored.role().is_none());
}

#[tokio::test]
async fn removing_an_unknown_role_changes_nothing() {
    let fixture = fixture();
    let commits_before = fixture.store.commits();

    let result = fixture.roles.remove_role(RoleId::new(5)).await;

    assert!(matches!(
        result,
        Err(AppError::NotFound {
            reason: ReasonCode::RoleNotFound,
            ..
        })
    ));
    assert_eq!(fixture.store.commits(), commits_before);
}
