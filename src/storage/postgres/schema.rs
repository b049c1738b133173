//! Diesel schema for board persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 80]
        username -> Varchar,
        /// Opaque encoded credential.
        #[max_length = 255]
        credential -> Varchar,
        /// Assigned role.
        #[max_length = 20]
        role -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 120]
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Descriptive status value.
        #[max_length = 50]
        status -> Varchar,
        /// Creator reference.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Set-valued project membership relation.
    project_members (project_id, user_id) {
        /// Project side of the pair.
        project_id -> Uuid,
        /// User side of the pair.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Owning project reference.
        project_id -> Uuid,
        /// Optional assignee reference.
        assigned_to -> Nullable<Uuid>,
        /// Creator reference.
        created_by -> Uuid,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Generated user stories archived against projects.
    user_stories (id) {
        /// Story identifier.
        id -> Uuid,
        /// Owning project reference.
        project_id -> Uuid,
        /// Story text.
        story -> Text,
        /// Archival timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, projects, project_members, tasks, user_stories);
