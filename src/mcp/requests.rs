// src/mcp/requests.rs
// MCP tool request types

use rmcp::schemars;
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Output format - list tools can render a table or pass raw JSON through
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Condensed fixed-column Markdown table
    #[default]
    Table,
    /// Raw pagination envelope as JSON
    Json,
}

// ============================================================================
// Issues
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIssueRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Comma-separated list of fields to return")]
    pub fields: Option<String>,
    #[schemars(description = "Comma-separated expand options, e.g. renderedFields,changelog")]
    pub expand: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateIssueRequest {
    #[schemars(description = "Project key, e.g. PROJ")]
    pub project_key: String,
    #[schemars(description = "Issue summary")]
    pub summary: String,
    #[schemars(description = "Issue type name, e.g. Task, Bug, Story")]
    pub issue_type: String,
    #[schemars(description = "Description as plain text or a pre-formed ADF document")]
    pub description: Option<Value>,
    #[schemars(description = "Priority name, e.g. High")]
    pub priority: Option<String>,
    #[schemars(description = "Assignee account ID")]
    pub assignee_account_id: Option<String>,
    #[schemars(description = "Labels to set")]
    pub labels: Option<Vec<String>>,
    #[schemars(description = "Component names")]
    pub components: Option<Vec<String>>,
    #[schemars(description = "Parent issue key (for subtasks or issues under an epic)")]
    pub parent_key: Option<String>,
    #[schemars(description = "Additional fields as a raw JSON object, merged last")]
    pub extra_fields: Option<Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateIssueRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "New summary")]
    pub summary: Option<String>,
    #[schemars(description = "New description as plain text or ADF")]
    pub description: Option<Value>,
    #[schemars(description = "Priority name")]
    pub priority: Option<String>,
    #[schemars(description = "Assignee account ID")]
    pub assignee_account_id: Option<String>,
    #[schemars(description = "Labels (replaces the existing set)")]
    pub labels: Option<Vec<String>>,
    #[schemars(description = "Additional fields as a raw JSON object, merged last")]
    pub extra_fields: Option<Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteIssueRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Also delete subtasks (default false)")]
    pub delete_subtasks: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchIssuesRequest {
    #[schemars(description = "JQL query, e.g. project = PROJ AND status = 'In Progress'")]
    pub jql: String,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Comma-separated list of fields to return")]
    pub fields: Option<String>,
    #[schemars(description = "Output format: table (default) or json")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTransitionsRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TransitionIssueRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Transition ID (from get_transitions)")]
    pub transition_id: String,
    #[schemars(description = "Comment to add while transitioning")]
    pub comment: Option<String>,
    #[schemars(description = "Fields to set during the transition, as a raw JSON object")]
    pub fields: Option<Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AssignIssueRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Assignee account ID; omit to unassign")]
    pub account_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIssueChangelogRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIssueEditMetaRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LinkIssuesRequest {
    #[schemars(description = "Link type name, e.g. Blocks, Relates")]
    pub link_type: String,
    #[schemars(description = "Inward issue key (e.g. the blocked issue)")]
    pub inward_key: String,
    #[schemars(description = "Outward issue key (e.g. the blocking issue)")]
    pub outward_key: String,
    #[schemars(description = "Comment to attach to the link")]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteIssueLinkRequest {
    #[schemars(description = "Issue link ID")]
    pub link_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetWatchersRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WatcherRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Watcher account ID")]
    pub account_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListAttachmentsRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteAttachmentRequest {
    #[schemars(description = "Attachment ID")]
    pub attachment_id: String,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCommentsRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Sort order: created or -created")]
    pub order_by: Option<String>,
    #[schemars(description = "Output: json (default, raw envelope) or table with plain-text excerpts")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddCommentRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Comment body as plain text or a pre-formed ADF document")]
    pub body: Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateCommentRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Comment ID")]
    pub comment_id: String,
    #[schemars(description = "New body as plain text or a pre-formed ADF document")]
    pub body: Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteCommentRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Comment ID")]
    pub comment_id: String,
}

// ============================================================================
// Worklogs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetWorklogsRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddWorklogRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Time spent, e.g. 3h 20m")]
    pub time_spent: String,
    #[schemars(description = "Worklog comment")]
    pub comment: Option<String>,
    #[schemars(description = "Start timestamp, e.g. 2024-05-01T10:00:00.000+0000")]
    pub started: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateWorklogRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Worklog ID")]
    pub worklog_id: String,
    #[schemars(description = "New time spent, e.g. 1h")]
    pub time_spent: Option<String>,
    #[schemars(description = "New comment")]
    pub comment: Option<String>,
    #[schemars(description = "New start timestamp")]
    pub started: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteWorklogRequest {
    #[schemars(description = "Issue key, e.g. PROJ-123")]
    pub issue_key: String,
    #[schemars(description = "Worklog ID")]
    pub worklog_id: String,
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Filter by project name or key substring")]
    pub query: Option<String>,
    #[schemars(description = "Output format: table (default) or json")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProjectRequest {
    #[schemars(description = "Project key, e.g. PROJ")]
    pub project_key: String,
    #[schemars(description = "Comma-separated expand options, e.g. description,lead")]
    pub expand: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProjectScopedRequest {
    #[schemars(description = "Project key, e.g. PROJ")]
    pub project_key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateVersionRequest {
    #[schemars(description = "Project key, e.g. PROJ")]
    pub project_key: String,
    #[schemars(description = "Version name, e.g. 2.0.0")]
    pub name: String,
    #[schemars(description = "Version description")]
    pub description: Option<String>,
    #[schemars(description = "Release date (YYYY-MM-DD)")]
    pub release_date: Option<String>,
    #[schemars(description = "Mark the version as released")]
    pub released: Option<bool>,
}

// ============================================================================
// Agile: boards, sprints, epics
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListBoardsRequest {
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Filter by project key")]
    pub project_key: Option<String>,
    #[schemars(description = "Board type: scrum or kanban")]
    pub board_type: Option<String>,
    #[schemars(description = "Filter by board name substring")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BoardRequest {
    #[schemars(description = "Board ID")]
    pub board_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BoardIssuesRequest {
    #[schemars(description = "Board ID")]
    pub board_id: u64,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Additional JQL filter")]
    pub jql: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSprintsRequest {
    #[schemars(description = "Board ID")]
    pub board_id: u64,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Sprint state filter: active, future, closed (comma-separable)")]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SprintRequest {
    #[schemars(description = "Sprint ID")]
    pub sprint_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateSprintRequest {
    #[schemars(description = "Board the sprint belongs to")]
    pub board_id: u64,
    #[schemars(description = "Sprint name")]
    pub name: String,
    #[schemars(description = "Start timestamp, e.g. 2024-05-01T09:00:00.000Z")]
    pub start_date: Option<String>,
    #[schemars(description = "End timestamp")]
    pub end_date: Option<String>,
    #[schemars(description = "Sprint goal")]
    pub goal: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateSprintRequest {
    #[schemars(description = "Sprint ID")]
    pub sprint_id: u64,
    #[schemars(description = "New name")]
    pub name: Option<String>,
    #[schemars(description = "New state: active, closed, future")]
    pub state: Option<String>,
    #[schemars(description = "New start timestamp")]
    pub start_date: Option<String>,
    #[schemars(description = "New end timestamp")]
    pub end_date: Option<String>,
    #[schemars(description = "New goal")]
    pub goal: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SprintIssuesRequest {
    #[schemars(description = "Sprint ID")]
    pub sprint_id: u64,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Additional JQL filter")]
    pub jql: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MoveIssuesToSprintRequest {
    #[schemars(description = "Target sprint ID")]
    pub sprint_id: u64,
    #[schemars(description = "Issue keys to move (at most 50)")]
    pub issue_keys: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MoveIssuesToBacklogRequest {
    #[schemars(description = "Issue keys to move (at most 50)")]
    pub issue_keys: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListEpicsRequest {
    #[schemars(description = "Board ID")]
    pub board_id: u64,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Include only done (true) or not-done (false) epics")]
    pub done: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EpicIssuesRequest {
    #[schemars(description = "Epic issue key, e.g. PROJ-42")]
    pub epic_key: String,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Additional JQL filter")]
    pub jql: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MoveIssuesToEpicRequest {
    #[schemars(description = "Epic issue key, e.g. PROJ-42")]
    pub epic_key: String,
    #[schemars(description = "Issue keys to move (at most 50)")]
    pub issue_keys: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RankIssuesRequest {
    #[schemars(description = "Issue keys to rank, in the desired order")]
    pub issue_keys: Vec<String>,
    #[schemars(description = "Anchor: rank the issues before this key")]
    pub rank_before_key: Option<String>,
    #[schemars(description = "Anchor: rank the issues after this key")]
    pub rank_after_key: Option<String>,
}

// ============================================================================
// Users and groups
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetUserRequest {
    #[schemars(description = "User account ID")]
    pub account_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchUsersRequest {
    #[schemars(description = "Query matched against display name and email")]
    pub query: String,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindAssignableUsersRequest {
    #[schemars(description = "Issue key to find assignable users for")]
    pub issue_key: Option<String>,
    #[schemars(description = "Project key to find assignable users for (when no issue key)")]
    pub project_key: Option<String>,
    #[schemars(description = "Query matched against display name and email")]
    pub query: Option<String>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListGroupsRequest {
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Filter by group name substring")]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetGroupMembersRequest {
    #[schemars(description = "Group ID")]
    pub group_id: String,
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
}

// ============================================================================
// Metadata
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListIssueTypesRequest {
    #[schemars(description = "Restrict to one project's issue types")]
    pub project_key: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListStatusesRequest {
    #[schemars(description = "Restrict to one project (grouped by issue type)")]
    pub project_key: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCreateMetaRequest {
    #[schemars(description = "Project key, e.g. PROJ")]
    pub project_key: String,
    #[schemars(description = "Restrict to one issue type ID")]
    pub issue_type_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListLabelsRequest {
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
}

// ============================================================================
// Filters and dashboards
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFiltersRequest {
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
    #[schemars(description = "Filter by name substring")]
    pub name: Option<String>,
    #[schemars(description = "Output format: table (default) or json")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FilterRequest {
    #[schemars(description = "Filter ID")]
    pub filter_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateFilterRequest {
    #[schemars(description = "Filter name")]
    pub name: String,
    #[schemars(description = "JQL the filter runs")]
    pub jql: String,
    #[schemars(description = "Filter description")]
    pub description: Option<String>,
    #[schemars(description = "Mark as favourite")]
    pub favourite: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFilterRequest {
    #[schemars(description = "Filter ID")]
    pub filter_id: String,
    #[schemars(description = "New name")]
    pub name: Option<String>,
    #[schemars(description = "New JQL")]
    pub jql: Option<String>,
    #[schemars(description = "New description")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDashboardsRequest {
    #[schemars(description = "Pagination offset (default 0)")]
    pub start_at: Option<u64>,
    #[schemars(description = "Page size (clamped to the configured maximum)")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDashboardRequest {
    #[schemars(description = "Dashboard ID")]
    pub dashboard_id: String,
}
