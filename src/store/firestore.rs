use std::collections::HashMap;

use reqwest::{
    Client,
    Method,
    RequestBuilder,
    StatusCode,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::VocabStore;
use crate::core::{
    VocabEntry,
    VocabotError,
};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: u32 = 300;

// Firestore wraps every field value in a type-tagged object. Only the two
// types this bot stores are modeled; integers travel as strings per the
// REST encoding of int64.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FsValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    integer_value: Option<String>,
}

impl FsValue {
    fn str(value: &str) -> Self {
        FsValue { string_value: Some(value.to_string()), ..Default::default() }
    }

    fn int(value: i64) -> Self {
        FsValue { integer_value: Some(value.to_string()), ..Default::default() }
    }

    fn as_str(&self) -> &str {
        self.string_value.as_deref().unwrap_or_default()
    }

    fn as_int(&self) -> i64 {
        self.integer_value.as_deref().and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    fields: HashMap<String, FsValue>,
}

impl FsDocument {
    fn doc_id(&self) -> Option<&str> {
        self.name.as_deref().and_then(|name| name.rsplit('/').next())
    }

    fn to_entry(&self) -> VocabEntry {
        let field = |key: &str| self.fields.get(key).cloned().unwrap_or_default();
        VocabEntry {
            word: field("vocab").as_str().to_string(),
            meaning: field("meaning").as_str().to_string(),
            timestamp: field("timestamp").as_int(),
            category: field("category").as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<FsDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunQueryResult {
    document: Option<FsDocument>,
}

/// Firestore REST v1 adapter. Authentication is a pre-acquired bearer
/// token; without one the client still works against the emulator via the
/// base-url override.
#[derive(Clone)]
pub struct FirestoreStore {
    client: Client,
    root: String,
    token: Option<String>,
}

impl FirestoreStore {
    pub fn new(project_id: &str, token: Option<String>, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let root =
            format!("{}/projects/{}/databases/(default)/documents", base, project_id);

        FirestoreStore { client: Client::new(), root, token }
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn entries_url(&self, category: &str) -> String {
        format!("{}/vocab/{}/vocab", self.root, category)
    }

    /// Write (create or overwrite) a document at a fixed path.
    async fn set_document(
        &self,
        path: &str,
        fields: HashMap<String, FsValue>,
    ) -> Result<(), VocabotError> {
        let url = format!("{}/{}", self.root, path);
        let doc = FsDocument { name: None, fields };
        let response = self.request(Method::PATCH, url).json(&doc).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, VocabotError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(VocabotError::StoreUnavailable(format!("Firestore returned {}: {}", status, body)))
    }

    /// All entry documents in `category` whose `vocab` field equals `word`.
    async fn query_entries_by_word(
        &self,
        category: &str,
        word: &str,
    ) -> Result<Vec<FsDocument>, VocabotError> {
        let url = format!("{}/vocab/{}:runQuery", self.root, category);
        let query = serde_json::json!({
            "structuredQuery": {
                "from": [{ "collectionId": "vocab" }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "vocab" },
                        "op": "EQUAL",
                        "value": { "stringValue": word },
                    }
                }
            }
        });

        let response = self.request(Method::POST, url).json(&query).send().await?;
        let response = Self::ensure_success(response).await?;
        let results: Vec<RunQueryResult> = response.json().await?;

        Ok(results.into_iter().filter_map(|r| r.document).collect())
    }

    /// Page through a collection listing until the token runs out.
    async fn list_collection(&self, url: &str) -> Result<Vec<FsDocument>, VocabotError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .request(Method::GET, url.to_string())
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = Self::ensure_success(request.send().await?).await?;
            let mut page: ListResponse = response.json().await?;
            documents.append(&mut page.documents);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(documents)
    }

    async fn delete_document(&self, name: &str) -> Result<(), VocabotError> {
        // `name` is the full resource path Firestore handed back
        let base = self.root.split("/projects/").next().unwrap_or_default();
        let url = format!("{}/{}", base, name);
        Self::ensure_success(self.request(Method::DELETE, url).send().await?).await?;
        Ok(())
    }
}

impl VocabStore for FirestoreStore {
    async fn category_exists(&self, category: &str) -> Result<bool, VocabotError> {
        let url = format!("{}/vocab/{}", self.root, category);
        let response = self.request(Method::GET, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::ensure_success(response).await?;
        Ok(true)
    }

    async fn create_category(&self, category: &str) -> Result<(), VocabotError> {
        let mut fields = HashMap::new();
        fields.insert(
            "createdAt".to_string(),
            FsValue::int(chrono::Utc::now().timestamp_millis()),
        );
        fields.insert("totalVocab".to_string(), FsValue::int(0));
        self.set_document(&format!("vocab/{}", category), fields).await
    }

    async fn add_entry(
        &self,
        category: &str,
        word: &str,
        meaning: &str,
    ) -> Result<(), VocabotError> {
        let entry = VocabEntry::new(category, word, meaning);
        let mut fields = HashMap::new();
        fields.insert("vocab".to_string(), FsValue::str(&entry.word));
        fields.insert("meaning".to_string(), FsValue::str(&entry.meaning));
        fields.insert("timestamp".to_string(), FsValue::int(entry.timestamp));
        fields.insert("category".to_string(), FsValue::str(&entry.category));

        let doc = FsDocument { name: None, fields };
        let response = self
            .request(Method::POST, self.entries_url(category))
            .json(&doc)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete_entries_by_word(
        &self,
        category: &str,
        word: &str,
    ) -> Result<usize, VocabotError> {
        let matches = self.query_entries_by_word(category, word).await?;
        let mut deleted = 0;

        for doc in &matches {
            if let Some(name) = &doc.name {
                self.delete_document(name).await?;
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    async fn delete_category(&self, category: &str) -> Result<(), VocabotError> {
        // Entries first, then the category document. Not atomic: a failure
        // in between leaves the intermediate state in the store.
        let entries = self.list_collection(&self.entries_url(category)).await?;
        for doc in &entries {
            if let Some(name) = &doc.name {
                self.delete_document(name).await?;
            }
        }

        let url = format!("{}/vocab/{}", self.root, category);
        Self::ensure_success(self.request(Method::DELETE, url).send().await?).await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<String>, VocabotError> {
        let url = format!("{}/vocab", self.root);
        let documents = self.list_collection(&url).await?;
        Ok(documents
            .iter()
            .filter_map(|doc| doc.doc_id().map(str::to_string))
            .collect())
    }

    async fn list_entries(&self, category: &str) -> Result<Vec<VocabEntry>, VocabotError> {
        let documents = self.list_collection(&self.entries_url(category)).await?;
        Ok(documents.iter().map(FsDocument::to_entry).collect())
    }

    async fn update_meaning(
        &self,
        category: &str,
        word: &str,
        new_meaning: &str,
    ) -> Result<usize, VocabotError> {
        let matches = self.query_entries_by_word(category, word).await?;
        let mut updated = 0;

        for doc in &matches {
            let Some(name) = &doc.name else { continue };
            let base = self.root.split("/projects/").next().unwrap_or_default();
            let url = format!("{}/{}", base, name);

            let mut fields = HashMap::new();
            fields.insert("meaning".to_string(), FsValue::str(new_meaning));
            let patch = FsDocument { name: None, fields };

            let response = self
                .request(Method::PATCH, url)
                .query(&[("updateMask.fieldPaths", "meaning")])
                .json(&patch)
                .send()
                .await?;
            Self::ensure_success(response).await?;
            updated += 1;
        }

        Ok(updated)
    }

    async fn probe(&self) -> Result<(), VocabotError> {
        let mut fields = HashMap::new();
        fields.insert("msg".to_string(), FsValue::str("Hello from vocabot!"));
        self.set_document("test/ping", fields).await
    }
}
