use crate::api::issues::IssueApi;
use crate::errors::IssueDeskError;
use crate::models::issue::Issue;
use crate::router::RouteParams;

/// One issue, fetched once when the page is entered.
#[derive(Debug, Default)]
pub struct DetailView {
    issue: Option<Issue>,
    last_error: Option<IssueDeskError>,
}

impl DetailView {
    /// Reads `id` from the route. Without one no request is made and the view stays empty.
    pub async fn initialize(api: &dyn IssueApi, params: &RouteParams) -> Self {
        let mut view = Self::default();

        let Some(id) = params.get("id").filter(|id| !id.is_empty()) else {
            tracing::debug!("detail view entered without an id");
            return view;
        };

        match api.get_issue(id).await {
            Ok(issue) => view.issue = Some(issue),
            Err(e) => {
                tracing::debug!(%id, error = ?e, "issue fetch failed");
                view.last_error = Some(e);
            }
        }

        view
    }

    pub fn issue(&self) -> Option<&Issue> {
        self.issue.as_ref()
    }

    pub fn last_error(&self) -> Option<&IssueDeskError> {
        self.last_error.as_ref()
    }
}
