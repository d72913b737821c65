use super::choose_application;
use crate::{core::PortalResponse, launcher::mock::MockLauncher};

#[tokio::test]
async fn installed_helper_is_chosen_without_desktop_suffix() {
    let launcher = MockLauncher::with_helper("steam-http-loader.desktop");

    let (response, choice) = choose_application(&launcher).await;

    assert_eq!(response, PortalResponse::Success);
    assert_eq!(choice.as_deref(), Some("steam-http-loader"));
    assert!(launcher.launched().is_empty());
}

#[tokio::test]
async fn missing_helper_answers_other() {
    let (response, choice) = choose_application(&MockLauncher::missing()).await;

    assert_eq!(response, PortalResponse::Other);
    assert_eq!(u32::from(response), 2);
    assert!(choice.is_none());
}
