//! BDD step definitions for Telegram delivery

use std::sync::Arc;

use cucumber::{given, then, when};

use review_watcher::config::TelegramConfig;
use review_watcher::error::NotifyError;
use review_watcher::io::{HttpClient, HttpResponse};
use review_watcher::telegram::TelegramNotifier;
use review_watcher::WatcherError;

use crate::world::WatcherWorld;

fn test_telegram_config() -> TelegramConfig {
    TelegramConfig {
        api_url: "http://telegram.invalid".to_string(),
        token: "123:abc".to_string(),
        chat_id: "42".to_string(),
    }
}

/// Mock HTTP client whose POSTs get a fixed status
struct FixedStatusClient(u16);

#[async_trait::async_trait]
impl HttpClient for FixedStatusClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> review_watcher::Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> review_watcher::Result<HttpResponse> {
        let body = if self.0 == 200 {
            r#"{"ok":true}"#
        } else {
            r#"{"ok":false,"description":"Unauthorized"}"#
        };
        Ok(HttpResponse {
            status: self.0,
            body: body.to_string(),
        })
    }
}

/// Mock HTTP client that simulates network failure
struct UnreachableClient;

#[async_trait::async_trait]
impl HttpClient for UnreachableClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> review_watcher::Result<HttpResponse> {
        Err(WatcherError::Http("connection refused".to_string()))
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> review_watcher::Result<HttpResponse> {
        Err(WatcherError::Http("connection refused".to_string()))
    }
}

#[given("a Telegram notifier with valid credentials")]
fn telegram_valid(world: &mut WatcherWorld) {
    let notifier = TelegramNotifier::new(&test_telegram_config(), Arc::new(FixedStatusClient(200)));
    world.notifier = Some(Box::new(notifier));
}

#[given("a Telegram notifier whose token is rejected")]
fn telegram_rejected(world: &mut WatcherWorld) {
    let notifier = TelegramNotifier::new(&test_telegram_config(), Arc::new(FixedStatusClient(401)));
    world.notifier = Some(Box::new(notifier));
}

#[given("a Telegram notifier that is unreachable")]
fn telegram_unreachable(world: &mut WatcherWorld) {
    let notifier = TelegramNotifier::new(&test_telegram_config(), Arc::new(UnreachableClient));
    world.notifier = Some(Box::new(notifier));
}

#[when(expr = "the message {string} is sent")]
async fn send_message(world: &mut WatcherWorld, message: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    world.notification_result = Some(notifier.send(&message).await);
}

#[then("the delivery should succeed")]
fn delivery_succeeds(world: &mut WatcherWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then(expr = "the delivery should be rejected with status {int}")]
fn delivery_rejected(world: &mut WatcherWorld, expected: u16) {
    match world.notification_result.as_ref().expect("no result") {
        Err(NotifyError::Rejected { status, .. }) => assert_eq!(*status, expected),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[then("the delivery should fail as unreachable")]
fn delivery_unreachable(world: &mut WatcherWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    assert!(matches!(result, Err(NotifyError::Unreachable(_))), "{result:?}");
}
