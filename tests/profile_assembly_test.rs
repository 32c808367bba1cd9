mod common;

use common::*;
use httpmock::prelude::*;
use profile_scraper::models::{CertificationEntry, EducationEntry, ExperienceEntry, ProfileIdentifier};
use profile_scraper::{Error, ProfileLookup, SkillsFetcher};
use serde_json::json;

fn jane() -> ProfileIdentifier {
    ProfileIdentifier::PublicId("jane-doe".to_string())
}

#[tokio::test]
async fn test_profile_is_flattened() {
    let server = MockServer::start_async().await;
    let profile_mock = mock_profile(&server, "jane-doe", full_profile_payload()).await;
    let skills_mock = mock_skills(&server, "jane-doe", skills_payload()).await;

    let profile = assembler_for(&server).get_profile(&jane()).await.unwrap();

    profile_mock.assert_async().await;
    skills_mock.assert_async().await;

    assert_eq!(
        profile.education,
        vec![
            EducationEntry {
                school: Some("Massachusetts Institute of Technology".to_string()),
                degree: Some("Bachelor of Science".to_string()),
                field_of_study: Some("Computer Science".to_string()),
                description: Some("Robotics club".to_string()),
            },
            EducationEntry {
                school: Some("Springfield High".to_string()),
                degree: None,
                field_of_study: None,
                description: None,
            },
        ]
    );

    assert_eq!(
        profile.certifications,
        vec![
            Some(CertificationEntry {
                authority: Some("Linux Foundation".to_string()),
                name: "CKA".to_string(),
            }),
            None,
        ]
    );

    assert_eq!(
        profile.experience,
        vec![
            ExperienceEntry {
                title: Some("Senior Engineer".to_string()),
                company: Some("Acme".to_string()),
                tenure: "1 yr(s) 6 mo(s)".to_string(),
                description: Some("Platform team".to_string()),
            },
            ExperienceEntry {
                title: Some("Engineer".to_string()),
                company: Some("Acme".to_string()),
                tenure: "1 yr(s) 10 mo(s)".to_string(),
                description: None,
            },
            ExperienceEntry {
                title: Some("Advisor".to_string()),
                company: Some("Initech".to_string()),
                tenure: "6 mo(s)".to_string(),
                description: None,
            },
            ExperienceEntry {
                title: Some("Intern".to_string()),
                company: None,
                tenure: "1 yr(s)".to_string(),
                description: None,
            },
        ]
    );

    assert_eq!(profile.skills, vec!["Rust".to_string(), "PostgreSQL".to_string()]);
}

#[tokio::test]
async fn test_soft_failure_yields_empty_profile() {
    let server = MockServer::start_async().await;
    let profile_mock = mock_profile(
        &server,
        "ghost",
        json!({"status": 404, "message": "Profile not found"}),
    )
    .await;
    let skills_mock = mock_skills(&server, "ghost", skills_payload()).await;

    let identifier = ProfileIdentifier::PublicId("ghost".to_string());
    let assembler = assembler_for(&server);

    let lookup = assembler.lookup(&identifier).await.unwrap();
    assert_eq!(
        lookup,
        ProfileLookup::Unavailable {
            status: Some(404),
            message: "Profile not found".to_string(),
        }
    );

    let profile = assembler.get_profile(&identifier).await.unwrap();
    assert!(profile.is_empty());

    assert_eq!(profile_mock.hits_async().await, 2);
    assert_eq!(skills_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_status_200_in_body_is_not_a_failure() {
    let server = MockServer::start_async().await;
    let mut payload = full_profile_payload();
    payload["status"] = json!(200);
    mock_profile(&server, "jane-doe", payload).await;
    mock_skills(&server, "jane-doe", json!({})).await;

    let profile = assembler_for(&server).get_profile(&jane()).await.unwrap();
    assert_eq!(profile.education.len(), 2);
    assert!(profile.skills.is_empty());
}

#[tokio::test]
async fn test_repeated_fetch_is_identical() {
    let server = MockServer::start_async().await;
    mock_profile(&server, "jane-doe", full_profile_payload()).await;
    mock_skills(&server, "jane-doe", skills_payload()).await;

    let assembler = assembler_for(&server);
    let first = assembler.get_profile(&jane()).await.unwrap();
    let second = assembler.get_profile(&jane()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn test_missing_sections_are_empty() {
    let server = MockServer::start_async().await;
    mock_profile(&server, "jane-doe", json!({"elements": [{}]})).await;
    mock_skills(&server, "jane-doe", skills_payload()).await;

    let profile = assembler_for(&server).get_profile(&jane()).await.unwrap();
    assert!(profile.education.is_empty());
    assert!(profile.certifications.is_empty());
    assert!(profile.experience.is_empty());
    assert_eq!(profile.skills.len(), 2);
}

#[tokio::test]
async fn test_empty_elements_is_parse_error() {
    let server = MockServer::start_async().await;
    mock_profile(&server, "jane-doe", json!({"elements": []})).await;

    let result = assembler_for(&server).get_profile(&jane()).await;
    assert!(matches!(result, Err(Error::ParseError(_))));
}

#[tokio::test]
async fn test_non_json_body_propagates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/voyager/api/identity/dash/profiles");
            then.status(502).body("<html>Bad gateway</html>");
        })
        .await;

    let result = assembler_for(&server).get_profile(&jane()).await;
    assert!(matches!(result, Err(Error::Serialization(_))));
}

#[tokio::test]
async fn test_urn_identifier_is_used_for_both_requests() {
    let server = MockServer::start_async().await;
    let profile_mock = mock_profile(&server, "ACoAAB", full_profile_payload()).await;
    let skills_mock = mock_skills(&server, "ACoAAB", skills_payload()).await;

    let identifier = ProfileIdentifier::Urn("ACoAAB".to_string());
    assembler_for(&server).get_profile(&identifier).await.unwrap();

    profile_mock.assert_async().await;
    skills_mock.assert_async().await;
}

#[tokio::test]
async fn test_skills_strip_entity_urn() {
    let server = MockServer::start_async().await;
    mock_skills(&server, "jane-doe", skills_payload()).await;

    let skills = SkillsFetcher::new(gateway_for(&server))
        .get_profile_skills(&jane())
        .await
        .unwrap();

    assert_eq!(skills.len(), 3);
    assert_eq!(skills[0].name.as_deref(), Some(" Rust "));
    assert_eq!(skills[2].name, None);
    assert!(skills.iter().all(|s| !s.extra.contains_key("entityUrn")));
}

#[tokio::test]
async fn test_skills_without_elements_is_empty() {
    let server = MockServer::start_async().await;
    mock_skills(&server, "jane-doe", json!({"paging": {"total": 0}})).await;

    let skills = SkillsFetcher::new(gateway_for(&server))
        .get_profile_skills(&jane())
        .await
        .unwrap();
    assert!(skills.is_empty());
}

#[tokio::test]
async fn test_skills_follow_full_pages() {
    let server = MockServer::start_async().await;
    let full_page: Vec<_> = (0..100)
        .map(|i| json!({"entityUrn": format!("urn:{}", i), "name": format!("Skill {}", i)}))
        .collect();

    let first = mock_skills(&server, "jane-doe", json!({"elements": full_page})).await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/voyager/api/identity/profiles/jane-doe/skills")
                .query_param("count", "100")
                .query_param("start", "100");
            then.status(200)
                .json_body(json!({"elements": [{"entityUrn": "urn:100", "name": "Last"}]}));
        })
        .await;

    let fetcher = SkillsFetcher::new(gateway_for(&server));
    assert_eq!(fetcher.get_profile_skills(&jane()).await.unwrap().len(), 100);
    assert_eq!(second.hits_async().await, 0);

    let fetcher = SkillsFetcher::new(gateway_for(&server)).with_max_pages(5);
    let skills = fetcher.get_profile_skills(&jane()).await.unwrap();
    assert_eq!(skills.len(), 101);
    assert_eq!(skills[100].name.as_deref(), Some("Last"));

    assert_eq!(first.hits_async().await, 2);
    second.assert_async().await;
}

#[tokio::test]
async fn test_non_numeric_status_is_soft_failure() {
    let server = MockServer::start_async().await;
    mock_profile(&server, "ghost", json!({"status": "404", "message": "Not found"})).await;
    mock_profile(&server, "nobody", json!({"status": null, "elements": []})).await;

    let assembler = assembler_for(&server);

    let lookup = assembler
        .lookup(&ProfileIdentifier::PublicId("ghost".to_string()))
        .await
        .unwrap();
    assert_eq!(
        lookup,
        ProfileLookup::Unavailable {
            status: Some(404),
            message: "Not found".to_string(),
        }
    );

    let lookup = assembler
        .lookup(&ProfileIdentifier::PublicId("nobody".to_string()))
        .await
        .unwrap();
    assert_eq!(
        lookup,
        ProfileLookup::Unavailable {
            status: None,
            message: String::new(),
        }
    );
}

#[tokio::test]
async fn test_null_sections_are_empty() {
    let server = MockServer::start_async().await;
    mock_profile(
        &server,
        "jane-doe",
        json!({"elements": [{
            "profileEducations": {"elements": [{"schoolName": "MIT"}]},
            "profileCertifications": null,
            "profilePositionGroups": {"elements": [
                {"profilePositionInPositionGroup": null},
                {"profilePositionInPositionGroup": {"elements": null}}
            ]}
        }]}),
    )
    .await;
    mock_skills(&server, "jane-doe", skills_payload()).await;

    let profile = assembler_for(&server).get_profile(&jane()).await.unwrap();
    assert_eq!(profile.education.len(), 1);
    assert_eq!(profile.education[0].school.as_deref(), Some("MIT"));
    assert!(profile.certifications.is_empty());
    assert!(profile.experience.is_empty());
}
