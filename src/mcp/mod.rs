// src/mcp/mod.rs
// MCP Server implementation

pub mod requests;
pub mod tools;

use crate::auth::TenantCredentials;
use crate::client::JiraClient;
use crate::config::Settings;
use crate::error::JiraError;
use requests::*;
use rmcp::{
    ErrorData, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// MCP Server state.
///
/// Tenant credentials are per request, resolved in the call_tool override;
/// everything else is shared across invocations.
#[derive(Clone)]
pub struct JiraMcpServer {
    pub settings: Arc<Settings>,
    pub http: reqwest::Client,
    pub tenant: Arc<RwLock<Option<TenantCredentials>>>,
    tool_router: ToolRouter<Self>,
}

impl JiraMcpServer {
    pub fn new(settings: Arc<Settings>, http: reqwest::Client) -> Self {
        Self {
            settings,
            http,
            tenant: Arc::new(RwLock::new(None)),
            tool_router: Self::tool_router(),
        }
    }

    /// Build an authenticated client for the current tenant
    pub async fn client(&self) -> Result<JiraClient, String> {
        let guard = self.tenant.read().await;
        let creds = guard
            .as_ref()
            .ok_or_else(|| JiraError::MissingCredentials.to_user_string())?;
        JiraClient::new(self.http.clone(), creds).map_err(|e| e.to_user_string())
    }

    /// Response character limit for rendered output
    pub fn limit(&self) -> usize {
        self.settings.response_char_limit
    }

    /// Resolve a requested page size against the configured bounds
    pub fn page(&self, requested: Option<u32>) -> u32 {
        self.settings.page_size(requested)
    }

    /// Resolve tenant credentials for one tool call: request headers first
    /// (streamable HTTP transport), environment second (stdio transport).
    async fn resolve_tenant(&self, context: &RequestContext<RoleServer>) {
        let resolved = match context.extensions.get::<axum::http::request::Parts>() {
            Some(parts) => match TenantCredentials::from_headers(&parts.headers) {
                Ok(Some(creds)) => Some(creds),
                Ok(None) => TenantCredentials::from_env(),
                Err(e) => {
                    warn!("incomplete tenant headers: {}", e);
                    None
                }
            },
            None => TenantCredentials::from_env(),
        };
        *self.tenant.write().await = resolved;
    }
}

#[tool_router]
impl JiraMcpServer {
    // ------------------------------------------------------------------
    // Issues
    // ------------------------------------------------------------------

    #[tool(description = "Get a single issue by key. Returns the raw issue JSON.")]
    async fn get_issue(
        &self,
        Parameters(req): Parameters<GetIssueRequest>,
    ) -> Result<String, String> {
        tools::issues::get_issue(self, req).await
    }

    #[tool(description = "Create an issue. Plain-text descriptions are wrapped into ADF automatically.")]
    async fn create_issue(
        &self,
        Parameters(req): Parameters<CreateIssueRequest>,
    ) -> Result<String, String> {
        tools::issues::create_issue(self, req).await
    }

    #[tool(description = "Update fields on an existing issue.")]
    async fn update_issue(
        &self,
        Parameters(req): Parameters<UpdateIssueRequest>,
    ) -> Result<String, String> {
        tools::issues::update_issue(self, req).await
    }

    #[tool(description = "Delete an issue, optionally with its subtasks.")]
    async fn delete_issue(
        &self,
        Parameters(req): Parameters<DeleteIssueRequest>,
    ) -> Result<String, String> {
        tools::issues::delete_issue(self, req).await
    }

    #[tool(description = "Search issues with JQL. Returns a summary table by default, or the raw pagination envelope as JSON.")]
    async fn search_issues(
        &self,
        Parameters(req): Parameters<SearchIssuesRequest>,
    ) -> Result<String, String> {
        tools::issues::search_issues(self, req).await
    }

    #[tool(description = "List the workflow transitions currently available for an issue.")]
    async fn get_transitions(
        &self,
        Parameters(req): Parameters<GetTransitionsRequest>,
    ) -> Result<String, String> {
        tools::issues::get_transitions(self, req).await
    }

    #[tool(description = "Move an issue through a workflow transition, optionally commenting or setting fields.")]
    async fn transition_issue(
        &self,
        Parameters(req): Parameters<TransitionIssueRequest>,
    ) -> Result<String, String> {
        tools::issues::transition_issue(self, req).await
    }

    #[tool(description = "Assign an issue to a user, or unassign it when no account_id is given.")]
    async fn assign_issue(
        &self,
        Parameters(req): Parameters<AssignIssueRequest>,
    ) -> Result<String, String> {
        tools::issues::assign_issue(self, req).await
    }

    #[tool(description = "Get an issue's change history (paginated).")]
    async fn get_issue_changelog(
        &self,
        Parameters(req): Parameters<GetIssueChangelogRequest>,
    ) -> Result<String, String> {
        tools::issues::get_issue_changelog(self, req).await
    }

    #[tool(description = "Get the editable-field metadata for an issue.")]
    async fn get_issue_edit_meta(
        &self,
        Parameters(req): Parameters<GetIssueEditMetaRequest>,
    ) -> Result<String, String> {
        tools::issues::get_issue_edit_meta(self, req).await
    }

    #[tool(description = "Link two issues, e.g. Blocks or Relates.")]
    async fn link_issues(
        &self,
        Parameters(req): Parameters<LinkIssuesRequest>,
    ) -> Result<String, String> {
        tools::issues::link_issues(self, req).await
    }

    #[tool(description = "Delete an issue link by ID.")]
    async fn delete_issue_link(
        &self,
        Parameters(req): Parameters<DeleteIssueLinkRequest>,
    ) -> Result<String, String> {
        tools::issues::delete_issue_link(self, req).await
    }

    #[tool(description = "List the issue link types available in this Jira instance.")]
    async fn get_issue_link_types(&self) -> Result<String, String> {
        tools::issues::get_issue_link_types(self).await
    }

    #[tool(description = "List an issue's watchers.")]
    async fn get_watchers(
        &self,
        Parameters(req): Parameters<GetWatchersRequest>,
    ) -> Result<String, String> {
        tools::issues::get_watchers(self, req).await
    }

    #[tool(description = "Add a watcher to an issue.")]
    async fn add_watcher(
        &self,
        Parameters(req): Parameters<WatcherRequest>,
    ) -> Result<String, String> {
        tools::issues::add_watcher(self, req).await
    }

    #[tool(description = "Remove a watcher from an issue.")]
    async fn remove_watcher(
        &self,
        Parameters(req): Parameters<WatcherRequest>,
    ) -> Result<String, String> {
        tools::issues::remove_watcher(self, req).await
    }

    #[tool(description = "List an issue's attachments.")]
    async fn list_attachments(
        &self,
        Parameters(req): Parameters<ListAttachmentsRequest>,
    ) -> Result<String, String> {
        tools::issues::list_attachments(self, req).await
    }

    #[tool(description = "Delete an attachment by ID.")]
    async fn delete_attachment(
        &self,
        Parameters(req): Parameters<DeleteAttachmentRequest>,
    ) -> Result<String, String> {
        tools::issues::delete_attachment(self, req).await
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    #[tool(description = "Get an issue's comments (paginated).")]
    async fn get_comments(
        &self,
        Parameters(req): Parameters<GetCommentsRequest>,
    ) -> Result<String, String> {
        tools::comments::get_comments(self, req).await
    }

    #[tool(description = "Add a comment to an issue. Plain text is wrapped into ADF automatically.")]
    async fn add_comment(
        &self,
        Parameters(req): Parameters<AddCommentRequest>,
    ) -> Result<String, String> {
        tools::comments::add_comment(self, req).await
    }

    #[tool(description = "Update an existing comment.")]
    async fn update_comment(
        &self,
        Parameters(req): Parameters<UpdateCommentRequest>,
    ) -> Result<String, String> {
        tools::comments::update_comment(self, req).await
    }

    #[tool(description = "Delete a comment from an issue.")]
    async fn delete_comment(
        &self,
        Parameters(req): Parameters<DeleteCommentRequest>,
    ) -> Result<String, String> {
        tools::comments::delete_comment(self, req).await
    }

    // ------------------------------------------------------------------
    // Worklogs
    // ------------------------------------------------------------------

    #[tool(description = "Get an issue's worklogs (paginated).")]
    async fn get_worklogs(
        &self,
        Parameters(req): Parameters<GetWorklogsRequest>,
    ) -> Result<String, String> {
        tools::worklogs::get_worklogs(self, req).await
    }

    #[tool(description = "Log time on an issue, e.g. '3h 20m'.")]
    async fn add_worklog(
        &self,
        Parameters(req): Parameters<AddWorklogRequest>,
    ) -> Result<String, String> {
        tools::worklogs::add_worklog(self, req).await
    }

    #[tool(description = "Update an existing worklog entry.")]
    async fn update_worklog(
        &self,
        Parameters(req): Parameters<UpdateWorklogRequest>,
    ) -> Result<String, String> {
        tools::worklogs::update_worklog(self, req).await
    }

    #[tool(description = "Delete a worklog entry from an issue.")]
    async fn delete_worklog(
        &self,
        Parameters(req): Parameters<DeleteWorklogRequest>,
    ) -> Result<String, String> {
        tools::worklogs::delete_worklog(self, req).await
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    #[tool(description = "List projects visible to the tenant (paginated), optionally filtered by name.")]
    async fn list_projects(
        &self,
        Parameters(req): Parameters<ListProjectsRequest>,
    ) -> Result<String, String> {
        tools::projects::list_projects(self, req).await
    }

    #[tool(description = "Get one project by key.")]
    async fn get_project(
        &self,
        Parameters(req): Parameters<GetProjectRequest>,
    ) -> Result<String, String> {
        tools::projects::get_project(self, req).await
    }

    #[tool(description = "List a project's components.")]
    async fn get_project_components(
        &self,
        Parameters(req): Parameters<ProjectScopedRequest>,
    ) -> Result<String, String> {
        tools::projects::get_project_components(self, req).await
    }

    #[tool(description = "List a project's versions.")]
    async fn get_project_versions(
        &self,
        Parameters(req): Parameters<ProjectScopedRequest>,
    ) -> Result<String, String> {
        tools::projects::get_project_versions(self, req).await
    }

    #[tool(description = "Create a version in a project.")]
    async fn create_version(
        &self,
        Parameters(req): Parameters<CreateVersionRequest>,
    ) -> Result<String, String> {
        tools::projects::create_version(self, req).await
    }

    #[tool(description = "Get a project's roles and their member URLs.")]
    async fn get_project_roles(
        &self,
        Parameters(req): Parameters<ProjectScopedRequest>,
    ) -> Result<String, String> {
        tools::projects::get_project_roles(self, req).await
    }

    #[tool(description = "List a project's statuses per issue type.")]
    async fn get_project_statuses(
        &self,
        Parameters(req): Parameters<ProjectScopedRequest>,
    ) -> Result<String, String> {
        tools::projects::get_project_statuses(self, req).await
    }

    // ------------------------------------------------------------------
    // Agile: boards, sprints, epics
    // ------------------------------------------------------------------

    #[tool(description = "List agile boards (paginated), optionally filtered by project, type, or name.")]
    async fn list_boards(
        &self,
        Parameters(req): Parameters<ListBoardsRequest>,
    ) -> Result<String, String> {
        tools::agile::list_boards(self, req).await
    }

    #[tool(description = "Get one board by ID.")]
    async fn get_board(
        &self,
        Parameters(req): Parameters<BoardRequest>,
    ) -> Result<String, String> {
        tools::agile::get_board(self, req).await
    }

    #[tool(description = "Get a board's configuration (columns, filter, estimation).")]
    async fn get_board_configuration(
        &self,
        Parameters(req): Parameters<BoardRequest>,
    ) -> Result<String, String> {
        tools::agile::get_board_configuration(self, req).await
    }

    #[tool(description = "List issues on a board (paginated), optionally narrowed with JQL.")]
    async fn get_board_issues(
        &self,
        Parameters(req): Parameters<BoardIssuesRequest>,
    ) -> Result<String, String> {
        tools::agile::get_board_issues(self, req).await
    }

    #[tool(description = "List a board's backlog issues (paginated).")]
    async fn get_board_backlog(
        &self,
        Parameters(req): Parameters<BoardIssuesRequest>,
    ) -> Result<String, String> {
        tools::agile::get_board_backlog(self, req).await
    }

    #[tool(description = "List a board's sprints (paginated), optionally filtered by state.")]
    async fn list_sprints(
        &self,
        Parameters(req): Parameters<ListSprintsRequest>,
    ) -> Result<String, String> {
        tools::agile::list_sprints(self, req).await
    }

    #[tool(description = "Get one sprint by ID.")]
    async fn get_sprint(
        &self,
        Parameters(req): Parameters<SprintRequest>,
    ) -> Result<String, String> {
        tools::agile::get_sprint(self, req).await
    }

    #[tool(description = "Create a sprint on a board.")]
    async fn create_sprint(
        &self,
        Parameters(req): Parameters<CreateSprintRequest>,
    ) -> Result<String, String> {
        tools::agile::create_sprint(self, req).await
    }

    #[tool(description = "Update a sprint's name, state, dates, or goal. Setting state to active starts the sprint.")]
    async fn update_sprint(
        &self,
        Parameters(req): Parameters<UpdateSprintRequest>,
    ) -> Result<String, String> {
        tools::agile::update_sprint(self, req).await
    }

    #[tool(description = "Delete a sprint (future sprints only).")]
    async fn delete_sprint(
        &self,
        Parameters(req): Parameters<SprintRequest>,
    ) -> Result<String, String> {
        tools::agile::delete_sprint(self, req).await
    }

    #[tool(description = "List issues in a sprint (paginated).")]
    async fn get_sprint_issues(
        &self,
        Parameters(req): Parameters<SprintIssuesRequest>,
    ) -> Result<String, String> {
        tools::agile::get_sprint_issues(self, req).await
    }

    #[tool(description = "Move up to 50 issues into a sprint.")]
    async fn move_issues_to_sprint(
        &self,
        Parameters(req): Parameters<MoveIssuesToSprintRequest>,
    ) -> Result<String, String> {
        tools::agile::move_issues_to_sprint(self, req).await
    }

    #[tool(description = "Move up to 50 issues back to the backlog.")]
    async fn move_issues_to_backlog(
        &self,
        Parameters(req): Parameters<MoveIssuesToBacklogRequest>,
    ) -> Result<String, String> {
        tools::agile::move_issues_to_backlog(self, req).await
    }

    #[tool(description = "List a board's epics (paginated).")]
    async fn list_epics(
        &self,
        Parameters(req): Parameters<ListEpicsRequest>,
    ) -> Result<String, String> {
        tools::agile::list_epics(self, req).await
    }

    #[tool(description = "List issues belonging to an epic (paginated).")]
    async fn get_epic_issues(
        &self,
        Parameters(req): Parameters<EpicIssuesRequest>,
    ) -> Result<String, String> {
        tools::agile::get_epic_issues(self, req).await
    }

    #[tool(description = "Move up to 50 issues into an epic.")]
    async fn move_issues_to_epic(
        &self,
        Parameters(req): Parameters<MoveIssuesToEpicRequest>,
    ) -> Result<String, String> {
        tools::agile::move_issues_to_epic(self, req).await
    }

    #[tool(description = "Re-rank issues before or after an anchor issue.")]
    async fn rank_issues(
        &self,
        Parameters(req): Parameters<RankIssuesRequest>,
    ) -> Result<String, String> {
        tools::agile::rank_issues(self, req).await
    }

    // ------------------------------------------------------------------
    // Users and groups
    // ------------------------------------------------------------------

    #[tool(description = "Get the user the supplied credentials belong to.")]
    async fn get_current_user(&self) -> Result<String, String> {
        tools::users::get_current_user(self).await
    }

    #[tool(description = "Get one user by account ID.")]
    async fn get_user(
        &self,
        Parameters(req): Parameters<GetUserRequest>,
    ) -> Result<String, String> {
        tools::users::get_user(self, req).await
    }

    #[tool(description = "Search users by display name or email.")]
    async fn search_users(
        &self,
        Parameters(req): Parameters<SearchUsersRequest>,
    ) -> Result<String, String> {
        tools::users::search_users(self, req).await
    }

    #[tool(description = "Find users assignable to an issue or within a project.")]
    async fn find_assignable_users(
        &self,
        Parameters(req): Parameters<FindAssignableUsersRequest>,
    ) -> Result<String, String> {
        tools::users::find_assignable_users(self, req).await
    }

    #[tool(description = "List groups (paginated), optionally filtered by name.")]
    async fn list_groups(
        &self,
        Parameters(req): Parameters<ListGroupsRequest>,
    ) -> Result<String, String> {
        tools::users::list_groups(self, req).await
    }

    #[tool(description = "List the members of a group (paginated).")]
    async fn get_group_members(
        &self,
        Parameters(req): Parameters<GetGroupMembersRequest>,
    ) -> Result<String, String> {
        tools::users::get_group_members(self, req).await
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    #[tool(description = "List all fields, including custom fields.")]
    async fn list_fields(&self) -> Result<String, String> {
        tools::metadata::list_fields(self).await
    }

    #[tool(description = "List issue types, globally or for one project.")]
    async fn list_issue_types(
        &self,
        Parameters(req): Parameters<ListIssueTypesRequest>,
    ) -> Result<String, String> {
        tools::metadata::list_issue_types(self, req).await
    }

    #[tool(description = "List priorities.")]
    async fn list_priorities(&self) -> Result<String, String> {
        tools::metadata::list_priorities(self).await
    }

    #[tool(description = "List statuses, globally or grouped by issue type for one project.")]
    async fn list_statuses(
        &self,
        Parameters(req): Parameters<ListStatusesRequest>,
    ) -> Result<String, String> {
        tools::metadata::list_statuses(self, req).await
    }

    #[tool(description = "List resolutions.")]
    async fn list_resolutions(&self) -> Result<String, String> {
        tools::metadata::list_resolutions(self).await
    }

    #[tool(description = "Get the field metadata required to create issues in a project.")]
    async fn get_create_meta(
        &self,
        Parameters(req): Parameters<GetCreateMetaRequest>,
    ) -> Result<String, String> {
        tools::metadata::get_create_meta(self, req).await
    }

    #[tool(description = "List labels used in this Jira instance (paginated).")]
    async fn list_labels(
        &self,
        Parameters(req): Parameters<ListLabelsRequest>,
    ) -> Result<String, String> {
        tools::metadata::list_labels(self, req).await
    }

    #[tool(description = "Get Jira server/deployment information.")]
    async fn get_server_info(&self) -> Result<String, String> {
        tools::metadata::get_server_info(self).await
    }

    // ------------------------------------------------------------------
    // Filters and dashboards
    // ------------------------------------------------------------------

    #[tool(description = "Search saved filters (paginated), optionally by name.")]
    async fn list_filters(
        &self,
        Parameters(req): Parameters<ListFiltersRequest>,
    ) -> Result<String, String> {
        tools::filters::list_filters(self, req).await
    }

    #[tool(description = "Get one saved filter by ID.")]
    async fn get_filter(
        &self,
        Parameters(req): Parameters<FilterRequest>,
    ) -> Result<String, String> {
        tools::filters::get_filter(self, req).await
    }

    #[tool(description = "Create a saved filter from a JQL query.")]
    async fn create_filter(
        &self,
        Parameters(req): Parameters<CreateFilterRequest>,
    ) -> Result<String, String> {
        tools::filters::create_filter(self, req).await
    }

    #[tool(description = "Update a saved filter's name, JQL, or description.")]
    async fn update_filter(
        &self,
        Parameters(req): Parameters<UpdateFilterRequest>,
    ) -> Result<String, String> {
        tools::filters::update_filter(self, req).await
    }

    #[tool(description = "Delete a saved filter.")]
    async fn delete_filter(
        &self,
        Parameters(req): Parameters<FilterRequest>,
    ) -> Result<String, String> {
        tools::filters::delete_filter(self, req).await
    }

    #[tool(description = "List the filters owned by the calling user.")]
    async fn get_my_filters(&self) -> Result<String, String> {
        tools::filters::get_my_filters(self).await
    }

    #[tool(description = "List dashboards (paginated).")]
    async fn list_dashboards(
        &self,
        Parameters(req): Parameters<ListDashboardsRequest>,
    ) -> Result<String, String> {
        tools::filters::list_dashboards(self, req).await
    }

    #[tool(description = "Get one dashboard by ID.")]
    async fn get_dashboard(
        &self,
        Parameters(req): Parameters<GetDashboardRequest>,
    ) -> Result<String, String> {
        tools::filters::get_dashboard(self, req).await
    }
}

impl ServerHandler for JiraMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "jira-mcp".into(),
                title: Some("Jira MCP - multi-tenant Jira tool server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Exposes the Jira REST and Agile APIs as tools. Credentials are read per \
                 request from the x-jira-domain/x-jira-email/x-jira-api-token/x-jira-oauth-token \
                 headers (or JIRA_* environment variables in stdio mode)."
                    .into(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let tool_name = request.name.to_string();
            let start = std::time::Instant::now();

            self.resolve_tenant(&context).await;

            let ctx = ToolCallContext::new(self, request, context);
            let result = self.tool_router.call(ctx).await;

            let duration_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(r) => debug!(
                    tool = %tool_name,
                    duration_ms,
                    is_error = r.is_error.unwrap_or(false),
                    "tool call finished"
                ),
                Err(e) => warn!(tool = %tool_name, duration_ms, error = %e.message, "tool call failed"),
            }

            result
        }
    }
}
