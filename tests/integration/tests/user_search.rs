//! User search against `PostgreSQL`.

use kc_model::User;
use kc_storage::{AttributeCriteria, InMemoryStore, UserProvider};
use kc_storage_sql::PgUserProvider;
use kc_user_search::{ContinueToken, RoleAttributeSearch, SearchError};

use crate::common::{DEFAULT_ROLE, TestEnv, usernames};

/// Seeds the three users most scenarios share.
///
/// `user3` is disabled. Every user maps to [`DEFAULT_ROLE`], `user2` also
/// maps to `op-regression`.
async fn seed(env: &TestEnv) -> anyhow::Result<kc_model::Realm> {
    let realm = env.create_realm("search-realm").await?;
    env.create_role(realm.id, DEFAULT_ROLE, "default-roles-search-realm")
        .await?;
    env.create_role(realm.id, "op-regression-id", "op-regression")
        .await?;

    env.create_user(
        realm.id,
        "user1",
        true,
        &[
            ("drfo", "888999000"),
            ("katottg", "UA10100000000000001"),
            ("code", "1111"),
        ],
    )
    .await?;
    let user2 = env
        .create_user(
            realm.id,
            "user2",
            true,
            &[
                ("drfo", "888999001"),
                ("katottg", "UA10200000000000002"),
                ("code", "2222"),
            ],
        )
        .await?;
    env.add_role_mapping(user2, "op-regression-id").await?;
    env.create_user(
        realm.id,
        "user3",
        false,
        &[
            ("drfo", "888999002"),
            ("katottg", "UA20300000000000003"),
            ("code", "11112222"),
        ],
    )
    .await?;

    Ok(realm)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn search_by_username() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let users = service
        .search_by_role_and_attributes(&context, &RoleAttributeSearch::new().username("user1"))
        .await?;

    assert_eq!(usernames(&users), ["user1"]);
    assert_eq!(users[0].attribute_values("drfo"), ["888999000".to_string()]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn search_by_role_name() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let users = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new().role_name("op-regression"),
        )
        .await?;

    assert_eq!(usernames(&users), ["user2"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn unknown_role_name_matches_nothing() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let users = service
        .search_by_role_and_attributes(&context, &RoleAttributeSearch::new().role_name("nonexistent"))
        .await?;

    assert!(users.is_empty());
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn search_by_enabled_flag() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let enabled = service
        .search_by_role_and_attributes(&context, &RoleAttributeSearch::new().enabled(true))
        .await?;
    let disabled = service
        .search_by_role_and_attributes(&context, &RoleAttributeSearch::new().enabled(false))
        .await?;

    assert_eq!(usernames(&enabled), ["user1", "user2"]);
    assert_eq!(usernames(&disabled), ["user3"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn attribute_equals() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let single = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().equals("drfo", ["888999001"])),
        )
        .await?;
    let any_of = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().equals("drfo", ["888999000", "888999002"])),
        )
        .await?;

    assert_eq!(usernames(&single), ["user2"]);
    assert_eq!(usernames(&any_of), ["user1", "user3"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn attribute_starts_with() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let single = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().starts_with("katottg", ["UA101"])),
        )
        .await?;
    let any_of = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().starts_with("katottg", ["UA101", "UA203"])),
        )
        .await?;

    assert_eq!(usernames(&single), ["user1"]);
    assert_eq!(usernames(&any_of), ["user1", "user3"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn attribute_that_are_start_for() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let single = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().that_are_start_for("code", ["11112222"])),
        )
        .await?;
    let any_of = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new().attributes(
                AttributeCriteria::new().that_are_start_for("code", ["111199", "22223333"]),
            ),
        )
        .await?;

    assert_eq!(usernames(&single), ["user1", "user3"]);
    assert_eq!(usernames(&any_of), ["user1", "user2"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn combined_criteria_must_all_hold() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let users = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .role_name("default-roles-search-realm")
                .enabled(true)
                .attributes(
                    AttributeCriteria::new()
                        .starts_with("katottg", ["UA1"])
                        .that_are_start_for("code", ["22229"]),
                ),
        )
        .await?;

    assert_eq!(usernames(&users), ["user2"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn roleless_users_are_excluded() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    env.create_roleless_user(realm.id, "user0", true, &[("drfo", "888999000")])
        .await?;
    let (service, context) = env.search(realm);

    let users = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().equals("drfo", ["888999000"])),
        )
        .await?;

    assert_eq!(usernames(&users), ["user1"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn results_are_distinct() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let multi = env
        .create_user(
            realm.id,
            "user4",
            true,
            &[("katottg", "UA10100000000000004"), ("katottg", "UA10100000000000005")],
        )
        .await?;
    env.add_role_mapping(multi, "op-regression-id").await?;
    let (service, context) = env.search(realm);

    let users = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().starts_with("katottg", ["UA101"])),
        )
        .await?;

    assert_eq!(usernames(&users), ["user1", "user4"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn offset_and_limit_page_ordered_results() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    env.create_user(realm.id, "user4", true, &[]).await?;
    env.create_user(realm.id, "user5", true, &[]).await?;
    let (service, context) = env.search(realm);

    let mut pages = Vec::new();
    for offset in [0, 2, 4] {
        let users = service
            .search_by_role_and_attributes(
                &context,
                &RoleAttributeSearch::new().offset(offset).limit(2),
            )
            .await?;
        pages.push(usernames(&users).join(","));
    }

    assert_eq!(pages, ["user1,user2", "user3,user4", "user5"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn like_metacharacters_match_literally() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    env.create_user(realm.id, "percent", true, &[("tag", "50%_off")])
        .await?;
    env.create_user(realm.id, "plain", true, &[("tag", "50xyoff")])
        .await?;
    let (service, context) = env.search(realm);

    let users = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().starts_with("tag", ["50%_"])),
        )
        .await?;

    assert_eq!(usernames(&users), ["percent"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn empty_candidate_list_is_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);

    let err = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().equals("drfo", Vec::<String>::new())),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::InvalidCriteria(_)));
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn paged_scan_includes_roleless_users() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    env.create_roleless_user(realm.id, "user0", true, &[("katottg", "UA10100000000000009")])
        .await?;
    let (service, context) = env.search(realm);
    let criteria = AttributeCriteria::new().starts_with("katottg", ["UA101"]);

    let first = service
        .search_by_attributes_paged(&context, &criteria, ContinueToken::START, Some(1))
        .await?;
    let second = service
        .search_by_attributes_paged(&context, &criteria, first.next, Some(1))
        .await?;

    assert_eq!(usernames(&first.users), ["user0"]);
    assert_eq!(usernames(&second.users), ["user1"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn equals_lookup_matches_every_entry() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let (service, context) = env.search(realm);
    let equals = kc_storage::AttributeFilter::from([
        (
            "drfo".to_string(),
            vec!["888999000".to_string(), "888999001".to_string()],
        ),
        ("code".to_string(), vec!["2222".to_string()]),
    ]);

    let users = service.filter_by_attributes_equals(&context, &equals).await?;

    assert_eq!(usernames(&users), ["user2"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn stored_prefixes_of_candidate_match() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = env.create_realm("prefix-realm").await?;
    for (username, code) in [
        ("user1", "11111111"),
        ("user2", "1111"),
        ("user3", "11"),
        ("user4", "1"),
        ("user5", "2"),
    ] {
        env.create_user(realm.id, username, true, &[("code", code)])
            .await?;
    }
    let (service, context) = env.search(realm);

    let users = service
        .search_by_role_and_attributes(
            &context,
            &RoleAttributeSearch::new()
                .attributes(AttributeCriteria::new().that_are_start_for("code", ["11111111"])),
        )
        .await?;

    assert_eq!(usernames(&users), ["user1", "user2", "user3", "user4"]);
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn sql_and_memory_order_usernames_alike() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = env.create_realm("order-realm").await?;
    let memory = InMemoryStore::new();
    for name in ["bob", "Zed", "alice", "\u{c9}mile", "_admin", "Bob"] {
        env.create_user(realm.id, name, true, &[]).await?;
        memory.add_user(User::new(realm.id, name));
    }

    let from_memory = memory.list(realm.id, 0, None).await?;
    let listed = PgUserProvider::new(env.pool.clone())
        .list(realm.id, 0, None)
        .await?;
    let (service, context) = env.search(realm);
    let searched = service
        .search_by_role_and_attributes(&context, &RoleAttributeSearch::new())
        .await?;

    assert_eq!(
        usernames(&from_memory),
        ["Bob", "Zed", "_admin", "alice", "bob", "\u{c9}mile"]
    );
    assert_eq!(usernames(&listed), usernames(&from_memory));
    assert_eq!(usernames(&searched), usernames(&from_memory));
    Ok(())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn returned_attributes_satisfy_the_filter_under_concurrent_writes() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let realm = seed(&env).await?;
    let user1: uuid::Uuid =
        sqlx::query_scalar("SELECT id FROM users WHERE username = 'user1'")
            .fetch_one(&env.pool)
            .await?;

    let pool = env.pool.clone();
    let writer = tokio::spawn(async move {
        loop {
            let toggled = sqlx::query(
                "UPDATE user_attributes \
                 SET value = CASE WHEN value = '888999000' THEN '777000000' ELSE '888999000' END \
                 WHERE user_id = $1 AND name = 'drfo'",
            )
            .bind(user1)
            .execute(&pool)
            .await;
            if toggled.is_err() {
                break;
            }
            tokio::task::yield_now().await;
        }
    });

    let (service, context) = env.search(realm);
    let search = RoleAttributeSearch::new()
        .attributes(AttributeCriteria::new().equals("drfo", ["888999000"]));
    for _ in 0..200 {
        let users = service
            .search_by_role_and_attributes(&context, &search)
            .await?;
        for user in &users {
            assert!(
                user.attribute_values("drfo").iter().any(|v| v == "888999000"),
                "{} returned with drfo {:?}",
                user.username,
                user.attribute_values("drfo")
            );
        }
    }

    writer.abort();
    Ok(())
}
