pub mod errors;
pub mod db;
pub mod category;
pub mod user;
pub mod provider;
pub mod credential;
pub mod favorite;

#[cfg(test)]
mod crud_tests {
    use migration::MigratorTrait;
    use uuid::Uuid;

    use crate::{category, credential, db, favorite, provider, user};

    #[tokio::test]
    async fn test_catalog_crud_roundtrip() {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return; }
        let db = match db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return;
            }
        };
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return;
        }

        let cat = category::create(&db, &format!("cat_{}", Uuid::new_v4()), None, Some("test category"))
            .await
            .expect("create category");

        let np = provider::NewProvider {
            owner_name: "Asha Verma".into(),
            service_name: "Verma Electricals".into(),
            description: "Wiring and fixture installation".into(),
            email: format!("prov_{}@example.com", Uuid::new_v4()),
            phone: "9876500000".into(),
            address: "12 MG Road".into(),
            lat: Some(19.07),
            lng: Some(72.87),
            category_id: cat.id,
            pricing: None,
            skills: vec!["wiring".into()],
            experience: None,
        };
        let p = provider::create(&db, np).await.expect("create provider");
        assert_eq!(p.status, provider::STATUS_PENDING);

        let u = user::create(
            &db,
            user::NewUser {
                name: "Bob".into(),
                email: format!("user_{}@example.com", Uuid::new_v4()),
                phone: None,
                address: None,
                lat: None,
                lng: None,
            },
            user::ROLE_USER,
        )
        .await
        .expect("create user");

        let cred = credential::upsert_password(&db, u.id, "x".repeat(32), "argon2").await.expect("upsert cred");
        assert_eq!(cred.principal_id, u.id);

        let fav = favorite::add(&db, u.id, p.id).await.expect("add favorite");
        assert_eq!(fav.provider_id, p.id);
        assert!(favorite::exists(&db, u.id, p.id).await.expect("exists"));
        assert!(favorite::remove(&db, u.id, p.id).await.expect("remove"));

        // cleanup
        user::hard_delete(&db, u.id).await.expect("delete user");
        provider::hard_delete(&db, p.id).await.expect("delete provider");
        category::hard_delete(&db, cat.id).await.expect("delete category");
    }
}
