//! Integration tests for the Diesel repositories against embedded PostgreSQL.
//!
//! Covers the per-user contact cap (transactional recount and the
//! `contacts_limit` trigger) and the read ordering of contacts, alerts and
//! chat history. Set `SKIP_TEST_CLUSTER=1` where no cluster can start.

use chrono::{Duration, TimeZone, Utc};
use futures_util::future::join_all;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use safety_backend::domain::ports::{
    AlertRepository, ChatMessageRepository, ContactRepository, ContactRepositoryError,
    UserProfileRepository,
};
use safety_backend::domain::{
    AlertStatus, ChatContent, ChatRole, ContactName, DisplayName, MAX_CONTACTS_PER_USER,
    NewAlert, NewChatMessage, NewContact, PhoneNumber, RECENT_ALERTS_LIMIT, UserId, UserProfile,
};
use safety_backend::outbound::persistence::{
    DbPool, DieselAlertRepository, DieselChatMessageRepository, DieselContactRepository,
    DieselUserProfileRepository, PoolConfig,
};
use tokio::runtime::Runtime;

mod support;

use support::pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, provision_database};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    pool: DbPool,
    owner: UserId,
}

impl TestContext {
    fn contacts(&self) -> DieselContactRepository {
        DieselContactRepository::new(self.pool.clone())
    }

    fn add_contact(&self, index: usize, limit: usize) -> Result<(), ContactRepositoryError> {
        let contact = new_contact(index);
        let repository = self.contacts();
        self.runtime
            .block_on(async { repository.insert(&self.owner, &contact, limit).await })
            .map(|_| ())
    }

    fn contact_count(&self) -> usize {
        let repository = self.contacts();
        self.runtime
            .block_on(async { repository.count_for_user(&self.owner).await })
            .expect("count contacts")
    }
}

fn new_contact(index: usize) -> NewContact {
    NewContact {
        name: ContactName::new(format!("Contact {index:02}")).expect("contact name"),
        number: PhoneNumber::new(format!("+1555000{index:04}")).expect("contact number"),
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = provision_database(&cluster, &runtime)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(4)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    let owner = UserId::random();
    let profile = UserProfile::new(
        owner.clone(),
        DisplayName::new("Store Test User").map_err(|err| err.to_string())?,
        PhoneNumber::new("+15550009999").map_err(|err| err.to_string())?,
    );
    let profiles = DieselUserProfileRepository::new(pool.clone());
    runtime
        .block_on(async { profiles.upsert(&profile).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        pool,
        owner,
    })
}

#[fixture]
fn store() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn eleventh_contact_is_refused_and_count_stays_at_cap(store: Option<TestContext>) {
    let Some(context) = store else {
        eprintln!("SKIP-TEST-CLUSTER: eleventh_contact_is_refused_and_count_stays_at_cap skipped");
        return;
    };

    for index in 0..MAX_CONTACTS_PER_USER {
        context
            .add_contact(index, MAX_CONTACTS_PER_USER)
            .expect("contact below the cap is stored");
    }

    let refused = context.add_contact(MAX_CONTACTS_PER_USER, MAX_CONTACTS_PER_USER);

    assert_eq!(
        refused,
        Err(ContactRepositoryError::limit_reached(MAX_CONTACTS_PER_USER))
    );
    assert_eq!(context.contact_count(), MAX_CONTACTS_PER_USER);
}

#[rstest]
fn trigger_refuses_eleventh_row_when_caller_cap_is_higher(store: Option<TestContext>) {
    let Some(context) = store else {
        eprintln!(
            "SKIP-TEST-CLUSTER: trigger_refuses_eleventh_row_when_caller_cap_is_higher skipped"
        );
        return;
    };
    let generous_cap = MAX_CONTACTS_PER_USER * 2;

    for index in 0..MAX_CONTACTS_PER_USER {
        context
            .add_contact(index, generous_cap)
            .expect("contact below the trigger cap is stored");
    }

    let refused = context.add_contact(MAX_CONTACTS_PER_USER, generous_cap);

    assert!(
        matches!(refused, Err(ContactRepositoryError::LimitReached { .. })),
        "trigger violation maps to LimitReached, got {refused:?}"
    );
    assert_eq!(context.contact_count(), MAX_CONTACTS_PER_USER);
}

#[rstest]
fn concurrent_inserts_never_exceed_the_cap(store: Option<TestContext>) {
    let Some(context) = store else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_inserts_never_exceed_the_cap skipped");
        return;
    };
    let preexisting = MAX_CONTACTS_PER_USER - 2;
    for index in 0..preexisting {
        context
            .add_contact(index, MAX_CONTACTS_PER_USER)
            .expect("seed contact");
    }

    let repository = context.contacts();
    let attempts: Vec<NewContact> = (preexisting..preexisting + 4).map(new_contact).collect();
    let outcomes = context.runtime.block_on(join_all(
        attempts
            .iter()
            .map(|contact| repository.insert(&context.owner, contact, MAX_CONTACTS_PER_USER)),
    ));

    let stored = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(stored, 2, "outcomes: {outcomes:?}");
    assert!(
        outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().err())
            .all(|err| matches!(err, ContactRepositoryError::LimitReached { .. }))
    );
    assert_eq!(context.contact_count(), MAX_CONTACTS_PER_USER);
}

#[rstest]
fn contacts_list_oldest_first_and_delete_is_owner_scoped(store: Option<TestContext>) {
    let Some(context) = store else {
        eprintln!(
            "SKIP-TEST-CLUSTER: contacts_list_oldest_first_and_delete_is_owner_scoped skipped"
        );
        return;
    };
    for index in 0..3 {
        context
            .add_contact(index, MAX_CONTACTS_PER_USER)
            .expect("contact stored");
    }
    let repository = context.contacts();

    let listed = context
        .runtime
        .block_on(async { repository.list_for_user(&context.owner).await })
        .expect("list contacts");

    let names: Vec<&str> = listed.iter().map(|contact| contact.name.as_ref()).collect();
    assert_eq!(names, ["Contact 00", "Contact 01", "Contact 02"]);
    assert!(listed.windows(2).all(|pair| pair[0].created_at <= pair[1].created_at));

    let stranger = UserId::random();
    let removed_by_stranger = context
        .runtime
        .block_on(async { repository.delete(&stranger, &listed[0].id).await })
        .expect("delete runs");
    let removed_by_owner = context
        .runtime
        .block_on(async { repository.delete(&context.owner, &listed[0].id).await })
        .expect("delete runs");

    assert!(!removed_by_stranger);
    assert!(removed_by_owner);
    assert_eq!(context.contact_count(), 2);
}

#[rstest]
fn recent_alerts_are_newest_first_and_capped(store: Option<TestContext>) {
    let Some(context) = store else {
        eprintln!("SKIP-TEST-CLUSTER: recent_alerts_are_newest_first_and_capped skipped");
        return;
    };
    let alerts = DieselAlertRepository::new(context.pool.clone());
    let base = Utc
        .with_ymd_and_hms(2026, 2, 1, 12, 0, 0)
        .single()
        .expect("timestamp");

    for minute in [3_i64, 0, 6, 1, 5, 2, 4] {
        let alert = NewAlert {
            user_id: context.owner.clone(),
            message: format!("alert at minute {minute}"),
            alert_time: base + Duration::minutes(minute),
            status: AlertStatus::Sent,
        };
        context
            .runtime
            .block_on(async { alerts.append(&alert).await })
            .expect("append alert");
    }

    let recent = context
        .runtime
        .block_on(async { alerts.list_recent(&context.owner, RECENT_ALERTS_LIMIT).await })
        .expect("list alerts");

    let messages: Vec<&str> = recent.iter().map(|alert| alert.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "alert at minute 6",
            "alert at minute 5",
            "alert at minute 4",
            "alert at minute 3",
            "alert at minute 2",
        ]
    );
    assert!(recent.iter().all(|alert| alert.status == AlertStatus::Sent));
}

#[rstest]
fn chat_window_keeps_the_latest_turns_oldest_first(store: Option<TestContext>) {
    let Some(context) = store else {
        eprintln!("SKIP-TEST-CLUSTER: chat_window_keeps_the_latest_turns_oldest_first skipped");
        return;
    };
    let chat = DieselChatMessageRepository::new(context.pool.clone());

    for turn in 0..5 {
        let role = if turn % 2 == 0 {
            ChatRole::User
        } else {
            ChatRole::Assistant
        };
        let message = NewChatMessage {
            user_id: context.owner.clone(),
            role,
            content: ChatContent::new(format!("turn {turn}")).expect("content"),
        };
        context
            .runtime
            .block_on(async { chat.append(&message).await })
            .expect("append chat turn");
    }

    let window = context
        .runtime
        .block_on(async { chat.list_recent(&context.owner, 3).await })
        .expect("list chat");

    let contents: Vec<&str> = window.iter().map(|message| message.content.as_ref()).collect();
    assert_eq!(contents, ["turn 2", "turn 3", "turn 4"]);
    assert_eq!(window[0].role, ChatRole::User);
    assert_eq!(window[1].role, ChatRole::Assistant);
}
