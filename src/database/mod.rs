use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Documento de sequência na collection `counters`.
/// biodata_id é gerado com $inc atômico sobre este documento.
#[derive(Debug, Serialize, Deserialize)]
struct Counter {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

const BIODATA_COUNTER: &str = "biodata_id";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool otimizado
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Timeouts otimizados
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("heartsUnite");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;
        mongodb.seed_counter().await?;

        Ok(mongodb)
    }

    /// Garante o documento de sequência antes do primeiro POST /biodata.
    /// $setOnInsert preserva um contador já avançado.
    async fn seed_counter(&self) -> Result<(), Box<dyn Error>> {
        let counters = self.db.collection::<Counter>("counters");

        counters
            .update_one(
                doc! { "_id": BIODATA_COUNTER },
                doc! { "$setOnInsert": { "seq": 0_i64 } },
            )
            .upsert(true)
            .await?;

        log::info!("🔧 Biodata id counter ready");

        Ok(())
    }

    /// Creates necessary indexes for optimal query performance
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::Document;

        log::info!("🔧 Creating database indexes...");

        // Unique index: users(email) - garante no máximo um User por email
        let users = self.db.collection::<Document>("users");
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        match users.create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Index: biodatas(biodata_id) - lookup do checkout pelo id sequencial
        let biodatas = self.db.collection::<Document>("biodatas");
        let biodata_id_index = IndexModel::builder()
            .keys(doc! { "biodata_id": 1 })
            .build();
        match biodatas.create_index(biodata_id_index).await {
            Ok(_) => log::info!("   ✅ Index created: biodatas(biodata_id)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Index: biodatas(biodata_type, biodata_status) - listagens filtradas e stats
        let type_status_index = IndexModel::builder()
            .keys(doc! { "biodata_type": 1, "biodata_status": 1 })
            .build();
        match biodatas.create_index(type_status_index).await {
            Ok(_) => log::info!("   ✅ Index created: biodatas(biodata_type, biodata_status)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Index: biodatas(contact_email) - viewBiodata por dono
        let owner_index = IndexModel::builder()
            .keys(doc! { "contact_email": 1 })
            .build();
        match biodatas.create_index(owner_index).await {
            Ok(_) => log::info!("   ✅ Index created: biodatas(contact_email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Unique index: fav_biodatas(added_by, biodata_id) - sem favoritos duplicados
        let favorites = self.db.collection::<Document>("fav_biodatas");
        let fav_index = IndexModel::builder()
            .keys(doc! { "added_by": 1, "biodata_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        match favorites.create_index(fav_index).await {
            Ok(_) => log::info!("   ✅ Index created: fav_biodatas(added_by, biodata_id) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Index: contact_requests(requester_email) - listagem por requester
        let contact_requests = self.db.collection::<Document>("contact_requests");
        let requester_index = IndexModel::builder()
            .keys(doc! { "requester_email": 1 })
            .build();
        match contact_requests.create_index(requester_index).await {
            Ok(_) => log::info!("   ✅ Index created: contact_requests(requester_email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    /// Próximo biodata_id sequencial.
    ///
    /// $inc atômico em um único documento da collection `counters` (upsert na
    /// primeira chamada) — duas criações concorrentes nunca recebem o mesmo id.
    pub async fn next_biodata_id(&self) -> Result<i64, String> {
        let counters = self.db.collection::<Counter>("counters");

        let counter = counters
            .find_one_and_update(
                doc! { "_id": BIODATA_COUNTER },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| format!("Failed to advance biodata_id counter: {}", e))?
            .ok_or_else(|| "Counter document missing after upsert".to_string())?;

        Ok(counter.seq)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_counter_is_sequential() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/heartsUnite_test".to_string());
        let db = MongoDB::new(&uri).await.expect("connect");

        let first = db.next_biodata_id().await.expect("first id");
        let second = db.next_biodata_id().await.expect("second id");
        assert_eq!(second, first + 1);

        // re-seed (restart do serviço) não rebobina a sequência
        db.seed_counter().await.expect("reseed");
        let third = db.next_biodata_id().await.expect("third id");
        assert_eq!(third, second + 1);
    }
}
