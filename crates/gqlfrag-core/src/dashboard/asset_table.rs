use crate::FragmentShape;
use serde::Deserialize;
use serde::Serialize;

pub const ASSET_TABLE_DEFINITION_FRAGMENT: &str = r#"
fragment AssetTableDefinitionFragment on AssetNode {
  id
  groupName @nullable
  isSource
  partitionDefinition @nullable {
    description
  }
  description @nullable
  repository {
    id
    name
    location {
      id
      name
    }
  }
}
"#;

pub const ASSET_TABLE_FRAGMENT: &str = r#"
fragment AssetTableFragment on Asset {
  __typename
  id
  key {
    path
  }
  definition @nullable {
    id
    ...AssetTableDefinitionFragment
  }
}
"#;

/// One row of the asset table.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AssetTableFragment {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub id: String,
    pub key: AssetKey,
    #[serde(default)]
    pub definition: Option<AssetTableDefinition>,
}
impl FragmentShape for AssetTableFragment {
    const FRAGMENT_NAME: &'static str = "AssetTableFragment";
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AssetKey {
    pub path: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTableDefinition {
    pub id: String,
    #[serde(default)]
    pub group_name: Option<String>,
    pub is_source: bool,
    #[serde(default)]
    pub partition_definition: Option<PartitionDefinition>,
    #[serde(default)]
    pub description: Option<String>,
    pub repository: Repository,
}
impl FragmentShape for AssetTableDefinition {
    const FRAGMENT_NAME: &'static str = "AssetTableDefinitionFragment";
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PartitionDefinition {
    pub description: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub location: RepositoryLocation,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RepositoryLocation {
    pub id: String,
    pub name: String,
}
