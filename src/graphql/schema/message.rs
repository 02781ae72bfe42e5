use juniper::{GraphQLInputObject, GraphQLObject, ID};

use crate::store::MessageRecord;

#[derive(GraphQLInputObject, Debug, Clone)]
#[graphql(description = "The writable fields of a message")]
pub struct MessageInput {
    pub content: Option<String>,
    pub author: Option<String>,
}

impl From<MessageInput> for MessageRecord {
    fn from(input: MessageInput) -> Self {
        MessageRecord {
            content: input.content,
            author: input.author,
        }
    }
}

#[derive(GraphQLObject, Debug, Clone, PartialEq)]
#[graphql(description = "A message posted to the in-memory board")]
pub struct Message {
    pub id: ID,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl Message {
    pub fn new(id: impl Into<String>, record: MessageRecord) -> Self {
        Message {
            id: ID::from(id.into()),
            content: record.content,
            author: record.author,
        }
    }
}
