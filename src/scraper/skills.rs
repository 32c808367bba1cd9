use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::linkedin::RequestGateway;
use crate::models::{ProfileIdentifier, SkillRecord};

pub const SKILLS_PAGE_SIZE: u32 = 100;

pub struct SkillsFetcher {
    gateway: Arc<RequestGateway>,
    page_size: u32,
    max_pages: u32,
}

impl SkillsFetcher {
    /// Reads only the first page of up to 100 skills.
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self {
            gateway,
            page_size: SKILLS_PAGE_SIZE,
            max_pages: 1,
        }
    }

    /// Keep requesting pages while they come back full, up to `max_pages`.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub async fn get_profile_skills(
        &self,
        identifier: &ProfileIdentifier,
    ) -> Result<Vec<SkillRecord>> {
        let uri = format!("/identity/profiles/{}/skills", identifier);
        let mut skills = Vec::new();
        let mut start = 0;

        for _ in 0..self.max_pages {
            let data = self
                .gateway
                .fetch(
                    &uri,
                    &[("count", self.page_size.to_string()), ("start", start.to_string())],
                )
                .await?;

            let page = parse_skill_page(data)?;
            let page_len = page.len();
            skills.extend(page);

            if page_len < self.page_size as usize {
                break;
            }
            start += self.page_size;
        }

        tracing::debug!("Fetched {} skills for {}", skills.len(), identifier);
        Ok(skills)
    }
}

fn parse_skill_page(mut data: Value) -> Result<Vec<SkillRecord>> {
    let elements = match data.get_mut("elements").map(Value::take) {
        Some(Value::Array(elements)) => elements,
        _ => return Ok(Vec::new()),
    };

    elements
        .into_iter()
        .map(|mut item| -> Result<SkillRecord> {
            if let Some(fields) = item.as_object_mut() {
                fields.remove("entityUrn");
            }
            Ok(serde_json::from_value(item)?)
        })
        .collect()
}
