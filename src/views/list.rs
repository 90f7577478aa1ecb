use crate::api::issues::{IssueApi, ListQuery, SortOrder};
use crate::errors::{IssueDeskError, Result};
use crate::models::issue::{Issue, IssueDraft};
use crate::router::Route;
use std::sync::Arc;

/// State of the inline create/edit form.
#[derive(Debug, Clone, Default)]
pub struct IssueForm {
    pub visible: bool,
    pub editing: bool,
    pub draft: IssueDraft,
}

/// A list request that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    token: u64,
    pub query: ListQuery,
}

/// Browsing state, the current page of issues, and the form.
pub struct ListView {
    api: Arc<dyn IssueApi>,
    query: ListQuery,
    issues: Vec<Issue>,
    form: IssueForm,
    last_error: Option<IssueDeskError>,
    latest_token: u64,
}

impl ListView {
    pub fn new(api: Arc<dyn IssueApi>, page_size: u32) -> Self {
        Self {
            api,
            query: ListQuery {
                page_size,
                ..ListQuery::default()
            },
            issues: Vec::new(),
            form: IssueForm::default(),
            last_error: None,
            latest_token: 0,
        }
    }

    pub async fn initialize(&mut self) -> Result<()> {
        self.reload().await
    }

    /// Requests the current page. The result is only applied if no newer request was issued meanwhile.
    pub async fn reload(&mut self) -> Result<()> {
        let ticket = self.begin_load();
        let result = self.api.list_issues(&ticket.query).await;
        let error = result.as_ref().err().cloned();
        self.apply_load(ticket, result);

        match error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_token += 1;
        LoadTicket {
            token: self.latest_token,
            query: self.query.clone(),
        }
    }

    /// Returns false when the response belongs to a superseded request and was dropped.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<Vec<Issue>>) -> bool {
        if ticket.token != self.latest_token {
            tracing::debug!(
                token = ticket.token,
                latest = self.latest_token,
                "discarding stale list response"
            );
            return false;
        }

        match result {
            Ok(issues) => {
                tracing::debug!(count = issues.len(), page = ticket.query.page, "list loaded");
                self.issues = issues;
                self.last_error = None;
            }
            Err(e) => {
                tracing::debug!(error = ?e, transport = e.is_transport(), "list request failed");
                self.last_error = Some(e);
            }
        }
        true
    }

    pub fn set_search(&mut self, search: &str) {
        self.query.search = search.to_string();
    }

    pub fn set_status_filter(&mut self, status: &str) {
        self.query.status = status.to_string();
    }

    pub fn set_priority_filter(&mut self, priority: &str) {
        self.query.priority = priority.to_string();
    }

    pub fn set_assignee_filter(&mut self, assignee: &str) {
        self.query.assignee = assignee.to_string();
    }

    /// Same column flips the order, a new column starts ascending.
    pub async fn sort(&mut self, column: &str) -> Result<()> {
        if self.query.sort_by == column {
            self.query.order = self.query.order.flipped();
        } else {
            self.query.sort_by = column.to_string();
            self.query.order = SortOrder::Asc;
        }
        self.reload().await
    }

    pub async fn previous_page(&mut self) -> Result<()> {
        if self.query.page > 1 {
            self.query.page -= 1;
            return self.reload().await;
        }
        Ok(())
    }

    // No upper bound: past the end the server returns an empty page.
    pub async fn next_page(&mut self) -> Result<()> {
        self.query.page = self.query.page.saturating_add(1);
        self.reload().await
    }

    pub fn view(&self, issue: &Issue) -> Route {
        Route::Detail {
            id: issue.id.clone(),
        }
    }

    pub fn open_create_form(&mut self) {
        self.form.editing = false;
        self.form.draft = IssueDraft::new_default();
        self.form.visible = true;
    }

    pub fn open_edit_form(&mut self, issue: &Issue) {
        self.form.editing = true;
        self.form.draft = IssueDraft::from(issue);
        self.form.visible = true;
    }

    /// Hides the form. The draft is kept until the form is opened again.
    pub fn close_form(&mut self) {
        self.form.visible = false;
    }

    pub fn draft_mut(&mut self) -> &mut IssueDraft {
        &mut self.form.draft
    }

    /// Updates when editing an issue with an id, otherwise creates. On success reloads and closes the form.
    pub async fn save(&mut self) -> Result<Issue> {
        let result = match (self.form.editing, self.form.draft.id.clone()) {
            (true, Some(id)) => self.api.update_issue(&id, &self.form.draft).await,
            _ => self.api.create_issue(&self.form.draft).await,
        };

        match result {
            Ok(saved) => {
                if let Err(e) = self.reload().await {
                    tracing::debug!(error = ?e, "reload after save failed");
                }
                self.close_form();
                Ok(saved)
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn form(&self) -> &IssueForm {
        &self.form
    }

    pub fn last_error(&self) -> Option<&IssueDeskError> {
        self.last_error.as_ref()
    }
}
