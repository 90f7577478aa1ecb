use crate::api::issues::{IssueApi, ListQuery};
use crate::errors::{IssueDeskError, Result};
use crate::models::issue::{Issue, IssueDraft};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    Get(String),
    Create(IssueDraft),
    Update(String, IssueDraft),
}

/// In-memory server double that records every call.
#[derive(Default)]
pub struct FakeApi {
    issues: Mutex<Vec<Issue>>,
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
}

pub fn sample_issue(id: &str, title: &str) -> Issue {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Issue {
        id: id.to_string(),
        title: title.to_string(),
        status: "open".to_string(),
        priority: "medium".to_string(),
        assignee: None,
        created_at: at,
        updated_at: at,
    }
}

impl FakeApi {
    pub fn with_issues(issues: Vec<Issue>) -> Self {
        Self {
            issues: Mutex::new(issues),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(IssueDeskError::NetworkError("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IssueApi for FakeApi {
    async fn list_issues(&self, query: &ListQuery) -> Result<Vec<Issue>> {
        self.record(Call::List(query.clone()))?;
        Ok(self.issues.lock().unwrap().clone())
    }

    async fn get_issue(&self, id: &str) -> Result<Issue> {
        self.record(Call::Get(id.to_string()))?;
        self.issues
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| IssueDeskError::IssueNotFound(id.to_string()))
    }

    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue> {
        self.record(Call::Create(draft.clone()))?;
        let mut issues = self.issues.lock().unwrap();
        let mut issue = sample_issue(&format!("new-{}", issues.len() + 1), "");
        issue.title = draft.title.clone().unwrap_or_default();
        if let Some(status) = &draft.status {
            issue.status = status.clone();
        }
        if let Some(priority) = &draft.priority {
            issue.priority = priority.clone();
        }
        issue.assignee = draft.assignee.clone();
        issues.push(issue.clone());
        Ok(issue)
    }

    async fn update_issue(&self, id: &str, draft: &IssueDraft) -> Result<Issue> {
        self.record(Call::Update(id.to_string(), draft.clone()))?;
        let mut issues = self.issues.lock().unwrap();
        let issue = issues
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| IssueDeskError::IssueNotFound(id.to_string()))?;
        if let Some(title) = &draft.title {
            issue.title = title.clone();
        }
        if let Some(status) = &draft.status {
            issue.status = status.clone();
        }
        if let Some(priority) = &draft.priority {
            issue.priority = priority.clone();
        }
        issue.assignee = draft.assignee.clone();
        Ok(issue.clone())
    }
}
