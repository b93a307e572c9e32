//! Diesel table definitions. Mirrors `migrations/`.

diesel::table! {
    /// Fruit documents. Comments are embedded as a JSONB array.
    fruits (id) {
        id -> Uuid,
        name -> Varchar,
        color -> Varchar,
        ready_to_eat -> Bool,
        /// Null for legacy fruits created before ownership existed.
        owner_id -> Nullable<Uuid>,
        comments -> Jsonb,
        /// Optimistic concurrency token, starts at 1.
        revision -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
