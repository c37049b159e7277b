#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{json, Value};

use fullstack_api::app;
use fullstack_api::clock::FixedClock;
use fullstack_api::config::AppConfig;
use fullstack_api::database::models::{
    NewActor, NewArtist, NewMovie, NewQuestion, NewShow, NewVenue, Performance,
};
use fullstack_api::database::{
    CastingStore, CastingUnit, FyyurStore, FyyurUnit, MemoryStore, TriviaStore, TriviaUnit,
    UnitOfWork,
};
use fullstack_api::types::AppKind;

pub const SECRET: &str = "integration-test-secret";
pub const AUDIENCE: &str = "casting";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.client.patch(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// The instant every fyyur test treats as "now"
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.pagination.questions_per_page = 10;
    config.pagination.rows_per_page = 10;
    config.security.auth.jwt_secret = Some(SECRET.to_string());
    config.security.auth.audience = Some(AUDIENCE.to_string());
    config
}

/// Serve `kind` from `store` on a free port, in this test's runtime
pub async fn spawn(kind: AppKind, store: MemoryStore) -> Result<TestServer> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();

    let store = Arc::new(store);
    let router = app::router_for(kind, store.clone(), Arc::new(FixedClock(now())), &config()).await?;

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        store,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub async fn body(resp: reqwest::Response) -> Result<Value> {
    Ok(resp.json::<Value>().await?)
}

/// Assert the standard error envelope and return the message
pub async fn expect_error(resp: reqwest::Response, status: StatusCode) -> Result<String> {
    assert_eq!(resp.status(), status);
    let body = body(resp).await?;
    assert_eq!(body["success"], json!(false), "{}", body);
    assert_eq!(body["error"], json!(status.as_u16()), "{}", body);
    Ok(body["message"].as_str().unwrap_or_default().to_string())
}

/// HS256 token accepted by the test config, granting `permissions`
pub fn token(permissions: &[&str]) -> String {
    let claims = json!({
        "sub": "auth0|tester",
        "aud": AUDIENCE,
        "iat": now().timestamp(),
        "exp": Utc::now().timestamp() + 3600,
        "permissions": permissions,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(permissions: &[&str]) -> String {
    format!("Bearer {}", token(permissions))
}

pub const CASTING_DIRECTOR: &[&str] = &[
    "get:actors",
    "post:actors",
    "patch:actors",
    "delete:actors",
    "get:movies",
    "patch:movies",
];

pub const EXECUTIVE_PRODUCER: &[&str] = &[
    "get:actors",
    "post:actors",
    "patch:actors",
    "delete:actors",
    "get:movies",
    "post:movies",
    "patch:movies",
    "delete:movies",
];

// Seed data

/// Categories Science(1), Art(2), Geography(3) and five questions
pub async fn trivia_store() -> Result<MemoryStore> {
    let store = MemoryStore::new();
    let mut unit = TriviaStore::begin(&store).await?;
    for kind in ["Science", "Art", "Geography"] {
        unit.insert_category(kind).await?;
    }
    let questions = [
        ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
        ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
        ("Which Dutch graphic artist painted impossible objects?", "Escher", 2, 1),
        ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ];
    for (question, answer, category, difficulty) in questions {
        unit.insert_question(NewQuestion {
            question: question.to_string(),
            answer: answer.to_string(),
            category,
            difficulty,
        })
        .await?;
    }
    unit.commit().await?;
    Ok(store)
}

/// Two venues, two artists and three shows around [`now`]
pub async fn fyyur_store() -> Result<MemoryStore> {
    let store = MemoryStore::new();
    let mut unit = FyyurStore::begin(&store).await?;

    let musical_hop = unit
        .insert_venue(NewVenue {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            genres: vec!["Jazz".into(), "Reggae".into()],
            seeking_talent: true,
            ..NewVenue::default()
        })
        .await?;
    let dueling_pianos = unit
        .insert_venue(NewVenue {
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: "NY".into(),
            address: "335 Delancey Street".into(),
            genres: vec!["Classical".into()],
            ..NewVenue::default()
        })
        .await?;

    let guns = unit
        .insert_artist(NewArtist {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: true,
            ..NewArtist::default()
        })
        .await?;
    let quevedo = unit
        .insert_artist(NewArtist {
            name: "Matt Quevedo".into(),
            city: "New York".into(),
            state: "NY".into(),
            genres: vec!["Jazz".into()],
            ..NewArtist::default()
        })
        .await?;

    let shows = [
        (musical_hop.id, guns.id, "2019-05-21T21:30:00Z"),
        (musical_hop.id, quevedo.id, "2035-04-01T20:00:00Z"),
        (dueling_pianos.id, quevedo.id, "2035-04-08T20:00:00Z"),
    ];
    for (venue_id, artist_id, start) in shows {
        unit.insert_show(NewShow {
            venue_id,
            artist_id,
            start_time: DateTime::parse_from_rfc3339(start)?.with_timezone(&Utc),
        })
        .await?;
    }

    unit.commit().await?;
    Ok(store)
}

/// Actors 1..=3, movies 1..=2, actor 1 cast in movie 1
pub async fn casting_store() -> Result<MemoryStore> {
    let store = MemoryStore::new();
    let mut unit = CastingStore::begin(&store).await?;
    for (name, age, gender) in [
        ("Mark Hamill", 68, Some("Male")),
        ("Carrie Fisher", 60, Some("Female")),
        ("Harrison Ford", 77, None),
    ] {
        unit.insert_actor(NewActor::new(name.into(), age, gender.map(String::from)))
            .await?;
    }
    for (title, date) in [("Star Wars", "1977-05-25"), ("Blade Runner", "1982-06-25")] {
        unit.insert_movie(NewMovie {
            title: title.into(),
            release_date: date.parse()?,
        })
        .await?;
    }
    unit.add_performance(Performance {
        movie_id: 1,
        actor_id: 1,
    })
    .await?;
    unit.commit().await?;
    Ok(store)
}
