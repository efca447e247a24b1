//! Contract checks for the directory ports.

use super::*;
use crate::domain::{ActiveStatus, CallerContext, CanonicalHandle, UserId, UserRecord};
use mockall::predicate::eq;
use rstest::rstest;

#[rstest]
#[case(UserLookupError::connection("refused"), "user repository connection failed: refused")]
#[case(UserLookupError::query("syntax"), "user repository query failed: syntax")]
#[case(UserLookupError::timeout("after 5000ms"), "user repository query timed out: after 5000ms")]
fn lookup_errors_format_their_messages(#[case] error: UserLookupError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
#[tokio::test]
async fn repository_port_is_object_safe_and_mockable() {
    let record = UserRecord::new(UserId::random(), "ada", "Ada Lovelace", "ada@example.com");
    let id = record.id;
    let returned = record.clone();

    let mut repo = MockUserLookupRepository::new();
    repo.expect_find_by_id()
        .with(eq(id))
        .times(1)
        .return_once(move |_| Ok(Some(returned)));
    repo.expect_find_many_by_normalized_handle()
        .withf(|handles: &[CanonicalHandle]| handles.len() == 1 && handles[0].as_str() == "ada")
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    repo.expect_find_active_statuses()
        .times(1)
        .return_once(move |ids: &[UserId]| {
            Ok(ids
                .iter()
                .map(|id| ActiveStatus { id: *id, active: true })
                .collect())
        });

    let repo: Box<dyn UserLookupRepository> = Box::new(repo);
    assert_eq!(repo.find_by_id(&id).await.expect("lookup"), Some(record));
    assert!(
        repo.find_many_by_normalized_handle(&[CanonicalHandle::from_raw("ADA")])
            .await
            .expect("lookup")
            .is_empty()
    );
    let statuses = repo.find_active_statuses(&[id]).await.expect("statuses");
    assert_eq!(statuses, vec![ActiveStatus { id, active: true }]);
}

#[rstest]
#[tokio::test]
async fn driving_port_is_mockable() {
    let mut query = MockUserDirectoryQuery::new();
    query
        .expect_get_active_statuses()
        .withf(|ctx, ids| ctx.current_user().is_none() && ids.as_deref() == Some(&[][..]))
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let statuses = query
        .get_active_statuses(&CallerContext::anonymous(), Some(Vec::new()))
        .await
        .expect("statuses");
    assert!(statuses.is_empty());
}
