use juniper::GraphQLObject;

use crate::store::UserRecord;

#[derive(GraphQLObject, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        User {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }
}
