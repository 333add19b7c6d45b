// Models of the pet-store style sample API. Only read by the resolver, never compiled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    #[swagger("required:true;in:query;")]
    pub message_id: String,
    pub service_id: i32,
    pub service_name: String,
    pub sno: String,
}

#[derive(Debug, Deserialize)]
pub struct GetStatus {
    #[swagger("required:true;in:query;multiple:true;enum:['available','pending','sold']")]
    pub status: Vec<String>,
}

pub mod user {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct GetUser {
        #[swagger("required:true;in:path;name:username")]
        pub username: String,
    }

    swaggerize::swagger_model! {
        #[derive(Debug, Deserialize)]
        pub struct PutUser {
            #[swagger("required:true;in:path;name:username")]
            pub username: String,
            pub email: String,
        }
    }

    #[derive(Debug, Serialize)]
    pub struct PutUserResponse {
        pub success: bool,
        pub error: String,
    }
}

pub enum Status {
    Available,
    Pending,
    Sold,
}
