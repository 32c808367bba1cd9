#![allow(dead_code)]

use std::sync::Arc;

use httpmock::prelude::*;
use httpmock::Mock;
use profile_scraper::models::YearMonth;
use profile_scraper::{LinkedInSession, NoDelay, ProfileAssembler, RequestGateway, SessionConfig};
use serde_json::{json, Value};

pub const DECORATION: &str =
    "com.linkedin.voyager.dash.deco.identity.profile.FullProfileWithEntities-47";

pub const OPEN_END: YearMonth = YearMonth {
    month: Some(8),
    year: 2020,
};

pub fn session_for(server: &MockServer) -> LinkedInSession {
    LinkedInSession::new(SessionConfig {
        api_base_url: server.url("/voyager/api"),
        site_base_url: server.base_url(),
        proxy: None,
    })
    .unwrap()
}

pub fn gateway_for(server: &MockServer) -> Arc<RequestGateway> {
    Arc::new(RequestGateway::new(session_for(server), NoDelay))
}

pub fn assembler_for(server: &MockServer) -> ProfileAssembler {
    ProfileAssembler::new(gateway_for(server), OPEN_END)
}

pub fn full_profile_payload() -> Value {
    json!({
        "elements": [{
            "entityUrn": "urn:li:fsd_profile:ACoAAB",
            "profileEducations": {
                "elements": [
                    {
                        "schoolName": "  Massachusetts Institute of Technology ",
                        "degreeName": "Bachelor of Science",
                        "fieldOfStudy": "Computer Science",
                        "description": "  Robotics club  "
                    },
                    {
                        "schoolName": "Springfield High"
                    }
                ]
            },
            "profileCertifications": {
                "elements": [
                    {"authority": " Linux Foundation ", "name": " CKA "},
                    {"authority": "Nameless Org"}
                ]
            },
            "profilePositionGroups": {
                "elements": [
                    {
                        "profilePositionInPositionGroup": {
                            "elements": [
                                {
                                    "title": "Senior Engineer ",
                                    "companyName": "Acme",
                                    "description": "Platform team",
                                    "dateRange": {
                                        "start": {"month": 1, "year": 2019},
                                        "end": {"month": 6, "year": 2020}
                                    }
                                },
                                {
                                    "title": "Engineer",
                                    "companyName": "Acme",
                                    "dateRange": {
                                        "start": {"month": 3, "year": 2017},
                                        "end": {"month": 12, "year": 2018}
                                    }
                                }
                            ]
                        }
                    },
                    {
                        "profilePositionInPositionGroup": {
                            "elements": [
                                {
                                    "title": "Advisor",
                                    "companyName": "  Initech  ",
                                    "dateRange": {
                                        "start": {"month": 3, "year": 2020}
                                    }
                                },
                                {
                                    "title": "Intern",
                                    "dateRange": {
                                        "start": {"year": 2014},
                                        "end": {"year": 2015}
                                    }
                                }
                            ]
                        }
                    }
                ]
            }
        }]
    })
}

pub fn skills_payload() -> Value {
    json!({
        "elements": [
            {"entityUrn": "urn:li:fs_skill:(ACoAAB,1)", "name": " Rust "},
            {"entityUrn": "urn:li:fs_skill:(ACoAAB,2)", "name": "PostgreSQL"},
            {"entityUrn": "urn:li:fs_skill:(ACoAAB,3)"}
        ],
        "paging": {"count": 100, "start": 0, "total": 3}
    })
}

pub async fn mock_profile<'a>(server: &'a MockServer, handle: &str, body: Value) -> Mock<'a> {
    let handle = handle.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET)
                .path("/voyager/api/identity/dash/profiles")
                .query_param("q", "memberIdentity")
                .query_param("memberIdentity", handle.as_str())
                .query_param("decorationId", DECORATION);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body);
        })
        .await
}

pub async fn mock_skills<'a>(server: &'a MockServer, handle: &str, body: Value) -> Mock<'a> {
    let path = format!("/voyager/api/identity/profiles/{}/skills", handle);
    server
        .mock_async(move |when, then| {
            when.method(GET)
                .path(path.as_str())
                .query_param("count", "100")
                .query_param("start", "0");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body);
        })
        .await
}
