//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Login email, unique.
        #[max_length = 255]
        email -> Varchar,
        /// Password digest from the hasher.
        password_digest -> Text,
        /// Granted roles.
        roles -> Array<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
