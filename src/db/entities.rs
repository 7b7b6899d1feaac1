pub mod album;
pub mod photo;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub id: i64,
    pub title: String,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub album_id: i64,
    pub title: String,
    pub url: String,
}

/// A photo row that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPhoto {
    pub album_id: i64,
    pub title: String,
    pub url: String,
}
