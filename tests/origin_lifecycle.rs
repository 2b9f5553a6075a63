use channel_origins::{
    config::{Config, DatabaseConfig},
    context::AppContext,
    database::Database,
    errors::AppError,
    models::{
        Channel, ChannelOffline, CustomShow, Filler, MigrationSummary, OfflineMode,
        OriginServerCreateRequest, OriginServerUpdateRequest, Program,
    },
};

const OLD_ICON: &str = "http://old:32400/library/metadata/5/thumb/9?X-Plex-Token=tok1";

async fn setup() -> AppContext {
    let mut config = Config::default();
    config.database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
    };

    let database = Database::new(&config.database).await.unwrap();
    database.migrate().await.unwrap();
    AppContext::new(config, database)
}

fn create_request(name: &str, address: &str) -> OriginServerCreateRequest {
    OriginServerCreateRequest {
        name: Some(name.to_string()),
        address: address.to_string(),
        credential: "tok1".to_string(),
        ..Default::default()
    }
}

fn bound(origin: &str, duration: i64, icon: Option<&str>) -> Program {
    Program {
        title: Some("Episode".to_string()),
        duration,
        icon: icon.map(str::to_string),
        origin_key: Some(origin.to_string()),
        ..Default::default()
    }
}

fn channel(number: i32, programs: Vec<Program>, fallback: Vec<Program>) -> Channel {
    Channel {
        number,
        name: format!("Channel {}", number),
        icon: None,
        programs,
        fallback,
        offline: ChannelOffline::default(),
    }
}

#[tokio::test]
async fn test_add_origin_assigns_unique_names_and_indices() {
    let context = setup().await;
    let service = &context.origin_service;

    let first = service
        .add_origin(create_request("studio", "http://a:32400/"))
        .await
        .unwrap();
    let second = service
        .add_origin(create_request("studio", "http://b:32400"))
        .await
        .unwrap();
    let third = service
        .add_origin(create_request("studio", "http://c:32400"))
        .await
        .unwrap();

    assert_eq!(first.name, "studio");
    assert_eq!(second.name, "studio2");
    assert_eq!(third.name, "studio3");
    assert_eq!(first.address, "http://a:32400");
    assert_eq!(
        [first.display_index, second.display_index, third.display_index],
        [0, 1, 2]
    );

    let listed: Vec<_> = service
        .list_origins()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(listed, vec!["studio", "studio2", "studio3"]);
}

#[tokio::test]
async fn test_add_origin_without_name_uses_default() {
    let context = setup().await;

    let server = context
        .origin_service
        .add_origin(OriginServerCreateRequest {
            name: Some("   ".to_string()),
            address: "http://plex.lan:32400".to_string(),
            credential: "tok".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(server.name, "plex");
    assert!(context.origin_service.does_name_exist("plex").await.unwrap());
}

#[tokio::test]
async fn test_delete_origin_retires_bound_programs() {
    let context = setup().await;
    context
        .origin_service
        .add_origin(create_request("studio", "http://old:32400"))
        .await
        .unwrap();

    let untouched = bound("other", 30, Some(OLD_ICON));
    context
        .channels
        .save_channel(&channel(
            1,
            vec![bound("studio", 10, None), untouched.clone(), bound("studio", 20, None)],
            vec![],
        ))
        .await
        .unwrap();

    let report = context.origin_service.delete_origin("studio").await.unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].channel_number, 1);
    assert_eq!(report[0].destroyed_count, 2);
    assert_eq!(report[0].modified_count, 0);

    let stored = context.channels.get_channel(1).await.unwrap().unwrap();
    assert_eq!(
        stored.programs,
        vec![Program::offline(10), untouched, Program::offline(20)]
    );
    assert!(!context.origin_service.does_name_exist("studio").await.unwrap());
}

#[tokio::test]
async fn test_update_origin_rewrites_artwork() {
    let context = setup().await;
    context
        .origin_service
        .add_origin(create_request("studio", "http://old:32400"))
        .await
        .unwrap();
    context
        .channels
        .save_channel(&channel(
            1,
            vec![bound("studio", 10, Some(OLD_ICON)), bound("studio", 20, None)],
            vec![],
        ))
        .await
        .unwrap();

    let report = context
        .origin_service
        .update_origin(OriginServerUpdateRequest {
            name: Some("studio".to_string()),
            address: "http://new:32400/".to_string(),
            credential: "tok2".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].modified_count, 1);
    assert_eq!(report[0].destroyed_count, 0);

    let stored = context.channels.get_channel(1).await.unwrap().unwrap();
    assert_eq!(
        stored.programs[0].icon.as_deref(),
        Some("http://new:32400/library/metadata/5/thumb/9?credential=tok2")
    );
    assert_eq!(stored.programs[0].origin_key.as_deref(), Some("studio"));
    assert_eq!(stored.programs[1].icon, None);

    let server = context.origin_service.get_origin("studio").await.unwrap();
    assert_eq!(server.address, "http://new:32400");
    assert_eq!(server.credential, "tok2");
}

#[tokio::test]
async fn test_update_origin_twice_is_idempotent() {
    let context = setup().await;
    context
        .origin_service
        .add_origin(create_request("studio", "http://old:32400"))
        .await
        .unwrap();
    context
        .fillers
        .save_filler(
            "f1",
            &Filler {
                id: "f1".to_string(),
                name: "Bumpers".to_string(),
                content: vec![bound("studio", 5, Some(OLD_ICON))],
            },
        )
        .await
        .unwrap();

    let update = || OriginServerUpdateRequest {
        name: Some("studio".to_string()),
        address: "http://new:32400".to_string(),
        credential: "tok2".to_string(),
        ..Default::default()
    };

    let first = context.origin_service.update_origin(update()).await.unwrap();
    let after_first = context.fillers.get_all_fillers().await.unwrap();
    let second = context.origin_service.update_origin(update()).await.unwrap();
    let after_second = context.fillers.get_all_fillers().await.unwrap();

    assert_eq!(MigrationSummary::from_rows(&first).modified, 1);
    assert_eq!(MigrationSummary::from_rows(&second).modified, 0);
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn test_offline_fallback_is_reset_and_cache_cleared() {
    let context = setup().await;
    context
        .origin_service
        .add_origin(create_request("studio", "http://old:32400"))
        .await
        .unwrap();

    let mut news = channel(
        4,
        vec![bound("studio", 10, None)],
        vec![Program::offline(60), bound("studio", 15, None)],
    );
    news.offline.mode = OfflineMode::Clip;
    context.channels.save_channel(&news).await.unwrap();

    // Warm the cache so the migration has something to clear.
    context
        .channel_cache
        .get_or_load(4, context.channels.as_ref())
        .await
        .unwrap();
    assert_eq!(context.channel_cache.len().await, 1);

    let report = context.origin_service.delete_origin("studio").await.unwrap();
    assert_eq!(report[0].destroyed_count, 2);

    let stored = context.channels.get_channel(4).await.unwrap().unwrap();
    assert!(stored.fallback.is_empty());
    assert_eq!(stored.offline.mode, OfflineMode::Pic);
    assert_eq!(
        stored.offline.picture.as_deref(),
        Some("http://localhost:8000/images/generic-offline-screen.png")
    );
    assert!(context.channel_cache.is_empty().await);
}

#[tokio::test]
async fn test_retirement_drops_offline_from_fillers_and_shows() {
    let context = setup().await;
    context
        .fillers
        .save_filler(
            "f1",
            &Filler {
                id: "f1".to_string(),
                name: "Bumpers".to_string(),
                content: vec![bound("studio", 5, None), bound("other", 6, None)],
            },
        )
        .await
        .unwrap();
    context
        .custom_shows
        .save_show(
            "s1",
            &CustomShow {
                id: "s1".to_string(),
                name: "Marathon".to_string(),
                content: vec![bound("studio", 7, None)],
            },
        )
        .await
        .unwrap();

    let report = context.origin_service.delete_origin("studio").await.unwrap();

    let labels: Vec<_> = report.iter().map(|r| r.entity_label.as_str()).collect();
    assert_eq!(labels, vec!["Bumpers (filler)", "Marathon (custom show)"]);
    assert!(report.iter().all(|r| r.channel_number == -1));
    assert_eq!(report[0].destroyed_count, 1);
    assert_eq!(report[1].destroyed_count, 1);

    let fillers = context.fillers.get_all_fillers().await.unwrap();
    assert_eq!(fillers[0].content.len(), 1);
    assert_eq!(fillers[0].content[0].origin_key.as_deref(), Some("other"));

    let shows = context.custom_shows.get_all_shows().await.unwrap();
    assert!(shows[0].content.is_empty());
}

#[tokio::test]
async fn test_lifecycle_errors() {
    let context = setup().await;
    let service = &context.origin_service;

    let missing_name = service
        .update_origin(OriginServerUpdateRequest {
            name: None,
            address: "http://new:32400".to_string(),
            credential: "tok2".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(missing_name, Err(AppError::Validation { .. })));

    let unknown = service
        .update_origin(OriginServerUpdateRequest {
            name: Some("ghost".to_string()),
            address: "http://new:32400".to_string(),
            credential: "tok2".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(unknown, Err(AppError::NotFound { .. })));

    let bad_address = service
        .add_origin(create_request("studio", "not a url"))
        .await;
    assert!(matches!(bad_address, Err(AppError::Validation { .. })));

    assert!(matches!(
        service.get_origin("ghost").await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_origin_trims_address_before_rewriting() {
    let context = setup().await;
    context
        .origin_service
        .add_origin(create_request("studio", "http://old:32400"))
        .await
        .unwrap();
    context
        .channels
        .save_channel(&channel(1, vec![bound("studio", 10, Some(OLD_ICON))], vec![]))
        .await
        .unwrap();

    context
        .origin_service
        .update_origin(OriginServerUpdateRequest {
            name: Some("studio".to_string()),
            address: "http://new:32400/ ".to_string(),
            credential: "tok2".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let server = context.origin_service.get_origin("studio").await.unwrap();
    assert_eq!(server.address, "http://new:32400");

    let stored = context.channels.get_channel(1).await.unwrap().unwrap();
    assert_eq!(
        stored.programs[0].icon.as_deref(),
        Some("http://new:32400/library/metadata/5/thumb/9?credential=tok2")
    );
}
