use billplz_core::types::{CollectionList, OpenCollectionList};
use billplz_core::{BillplzResult, Collection, CreateCollection, CreateOpenCollection, OpenCollection, Version};
use serde_json::Value;

use crate::client::{paged, resolve_id, BillplzClient};
use crate::dispatcher::{HttpMethod, RequestOptions};

impl BillplzClient {
    pub async fn create_collection(
        &self,
        collection: &CreateCollection,
        options: &RequestOptions,
    ) -> BillplzResult<Collection> {
        self.dispatcher()
            .caller(HttpMethod::Post, self.url(None, "collections"), "create_collection")
            .send_json(collection, options)
            .await
    }

    /// Fetches a collection, defaulting to the configured collection.
    pub async fn get_collection(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<Collection> {
        let id = resolve_id(collection_id, self.config().collection_id.as_ref(), "collection")?;
        self.dispatcher()
            .caller(HttpMethod::Get, self.url(None, &format!("collections/{}", id)), "get_collection")
            .send(options)
            .await
    }

    pub async fn list_collections(
        &self,
        page: Option<u32>,
        options: &RequestOptions,
    ) -> BillplzResult<CollectionList> {
        self.dispatcher()
            .caller(HttpMethod::Get, self.url(None, "collections"), "list_collections")
            .send(&paged(options, page))
            .await
    }

    pub async fn create_open_collection(
        &self,
        collection: &CreateOpenCollection,
        options: &RequestOptions,
    ) -> BillplzResult<OpenCollection> {
        self.dispatcher()
            .caller(HttpMethod::Post, self.url(None, "open_collections"), "create_open_collection")
            .send_json(collection, options)
            .await
    }

    /// Fetches an open collection, defaulting to the configured collection.
    pub async fn get_open_collection(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<OpenCollection> {
        let id = resolve_id(collection_id, self.config().collection_id.as_ref(), "collection")?;
        self.dispatcher()
            .caller(
                HttpMethod::Get,
                self.url(None, &format!("open_collections/{}", id)),
                "get_open_collection",
            )
            .send(options)
            .await
    }

    pub async fn list_open_collections(
        &self,
        page: Option<u32>,
        options: &RequestOptions,
    ) -> BillplzResult<OpenCollectionList> {
        self.dispatcher()
            .caller(HttpMethod::Get, self.url(None, "open_collections"), "list_open_collections")
            .send(&paged(options, page))
            .await
    }

    /// Re-enables a collection (v3).
    pub async fn activate_collection(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<Value> {
        self.set_collection_state(collection_id, "activate", "activate_collection", options)
            .await
    }

    /// Stops a collection from taking payments (v3).
    pub async fn deactivate_collection(
        &self,
        collection_id: Option<&str>,
        options: &RequestOptions,
    ) -> BillplzResult<Value> {
        self.set_collection_state(collection_id, "deactivate", "deactivate_collection", options)
            .await
    }

    async fn set_collection_state(
        &self,
        collection_id: Option<&str>,
        transition: &str,
        action: &'static str,
        options: &RequestOptions,
    ) -> BillplzResult<Value> {
        let id = resolve_id(collection_id, self.config().collection_id.as_ref(), "collection")?;
        let url = self.url(Some(Version::V3), &format!("collections/{}/{}", id, transition));
        self.dispatcher()
            .caller(HttpMethod::Post, url, action)
            .send(options)
            .await
    }
}
