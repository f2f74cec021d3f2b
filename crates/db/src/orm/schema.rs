// Mirrors db/migrations/20250101000001_create_universities.sql.

diesel::table! {
    universities (id) {
        id -> BigInt,
        name -> Text,
        short_name -> Text,
        location -> Text,
        website -> Nullable<Text>,
        test_required -> Text,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
