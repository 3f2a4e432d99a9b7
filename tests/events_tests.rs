//! Event publication across content mutations

mod harness;

use harness::TestBackend;
use mosaic::prelude::*;

fn drain(rx: &mut tokio::sync::broadcast::Receiver<EventEnvelope>) -> Vec<(String, String)> {
    let mut seen = Vec::new();
    while let Ok(envelope) = rx.try_recv() {
        seen.push((
            envelope.event.event_kind().to_string(),
            envelope.event.action().to_string(),
        ));
    }
    seen
}

#[tokio::test]
async fn test_create_publishes_facet_then_entity_events() {
    let backend = TestBackend::new();
    let directories = backend.service::<Directory>();
    let mut rx = backend.events.subscribe();
    let tenant_id = Uuid::new_v4();

    directories
        .create(
            Directory::new(tenant_id, "CITIES"),
            FacetPatch::new()
                .with_strings(vec![StringInput::new("NAME", "Cities")])
                .with_flags(vec![FlagInput::new("PUBLISHED")]),
        )
        .await
        .unwrap();

    let seen = drain(&mut rx);

    // Three facets changed (strings, the implicit admin grant, flags); the
    // entity event closes the mutation.
    let facet_count = seen.iter().filter(|(kind, _)| kind == "facet").count();
    assert_eq!(facet_count, 3);
    assert_eq!(
        seen.last().unwrap(),
        &("entity".to_string(), "created".to_string())
    );
}

#[tokio::test]
async fn test_noop_reconciliations_stay_silent() {
    let backend = TestBackend::new();
    let directories = backend.service::<Directory>();
    let tenant_id = Uuid::new_v4();
    let patch = FacetPatch::new().with_strings(vec![StringInput::new("NAME", "Cities")]);

    directories
        .create(Directory::new(tenant_id, "CITIES"), patch.clone())
        .await
        .unwrap();

    let mut rx = backend.events.subscribe();
    directories
        .update(
            tenant_id,
            "CITIES",
            Directory::new(tenant_id, "CITIES"),
            patch,
        )
        .await
        .unwrap();

    let seen = drain(&mut rx);

    // Every facet already matched its desired set; only the entity event fires
    assert_eq!(seen, vec![("entity".to_string(), "updated".to_string())]);
}

#[tokio::test]
async fn test_lifecycle_actions_are_published() {
    let backend = TestBackend::new();
    let directories = backend.service::<Directory>();
    let mut rx = backend.events.subscribe();
    let tenant_id = Uuid::new_v4();

    directories
        .create(Directory::new(tenant_id, "CITIES"), FacetPatch::new())
        .await
        .unwrap();
    directories.archive(tenant_id, "CITIES").await.unwrap();
    directories.restore(tenant_id, "CITIES").await.unwrap();
    directories.delete(tenant_id, "CITIES").await.unwrap();

    let actions: Vec<String> = drain(&mut rx)
        .into_iter()
        .filter(|(kind, _)| kind == "entity")
        .map(|(_, action)| action)
        .collect();

    assert_eq!(actions, vec!["created", "archived", "restored", "deleted"]);
}

#[tokio::test]
async fn test_facet_event_carries_counts_and_owner() {
    let backend = TestBackend::new();
    let strings = backend.strings();
    let mut rx = backend.events.subscribe();
    let tenant_id = Uuid::new_v4();
    let owner = EntityRef::new("directory", "CITIES");

    strings
        .reconcile(
            tenant_id,
            &owner,
            vec![
                StringInput::new("NAME", "London"),
                StringInput::new("CODE", "LDN"),
            ],
        )
        .await
        .unwrap();

    let envelope = rx.recv().await.unwrap();
    match envelope.event {
        ContentEvent::Facet(FacetEvent::Reconciled {
            tenant_id: event_tenant,
            owner: event_owner,
            family,
            inserted,
            deleted,
            kept,
        }) => {
            assert_eq!(event_tenant, tenant_id);
            assert_eq!(event_owner, owner);
            assert_eq!(family, "string");
            assert_eq!(inserted, 2);
            assert_eq!(deleted, 0);
            assert_eq!(kept, 0);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}
