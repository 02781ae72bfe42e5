use juniper::{graphql_object, EmptySubscription, RootNode, ID};

use super::Context;
use crate::dice::{self, Die};
use crate::error::Error;
use crate::store::MessageRecord;

mod die;
mod message;
mod user;

pub use die::RandomDie;
pub use message::{Message, MessageInput};
pub use user::User;

pub struct Query;

#[graphql_object(context = Context)]
impl Query {
    fn hello() -> &'static str {
        "Hello world!"
    }

    fn borg_me() -> &'static str {
        dice::borg_me()
    }

    /// A uniformly random integer between 1 and `max`, inclusive.
    fn roll_dice(max: i32) -> Result<Option<i32>, Error> {
        dice::roll_dice(max).map(Some)
    }

    /// A die with `numSides` sides, or six when omitted.
    fn get_die(num_sides: Option<i32>) -> RandomDie {
        Die::new(num_sides).into()
    }

    fn get_message(context: &Context, id: ID) -> Result<Option<Message>, Error> {
        let id: &str = &id;
        match context.messages.get(id)? {
            Some(record) => Ok(Some(Message::new(id, record))),
            None => Err(Error::not_found(id)),
        }
    }

    /// The address the request came from, when the transport knows it.
    fn ip(context: &Context) -> Option<String> {
        context.client_ip.map(|ip| ip.to_string())
    }

    fn user(context: &Context, id: Option<String>) -> Option<User> {
        id.and_then(|id| context.users.get(&id).map(User::from))
    }
}

pub struct Mutation;

#[graphql_object(context = Context)]
impl Mutation {
    fn create_message(context: &Context, input: MessageInput) -> Result<Option<Message>, Error> {
        let record: MessageRecord = input.into();
        let id = context.messages.insert(record.clone())?;
        log::info!("Created message {}", id);
        Ok(Some(Message::new(id, record)))
    }

    /// Replaces every field of an existing message.
    fn update_message(
        context: &Context,
        id: ID,
        input: MessageInput,
    ) -> Result<Option<Message>, Error> {
        let id: &str = &id;
        let record: MessageRecord = input.into();
        context.messages.replace(id, record.clone())?;
        log::info!("Updated message {}", id);
        Ok(Some(Message::new(id, record)))
    }
}

// A root schema consists of a query and a mutation.
// Request queries can be executed against a RootNode.
pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

pub fn new_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::<Context>::new())
}

/// The schema contract in GraphQL SDL.
pub fn schema_sdl() -> String {
    new_schema().as_sdl()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::AppState;
    use juniper::{execute_sync, graphql_value, Variables};
    use serde_json::Value as Json;

    fn run(schema: &Schema, ctx: &Context, query: &str) -> (Json, Vec<Json>) {
        let (value, errors) = execute_sync(query, None, schema, &Variables::new(), ctx)
            .expect("query should validate");
        let errors = errors
            .iter()
            .map(|e| serde_json::to_value(e).unwrap())
            .collect();
        (serde_json::to_value(&value).unwrap(), errors)
    }

    fn create(schema: &Schema, ctx: &Context, content: &str, author: &str) -> String {
        let (data, errors) = run(
            schema,
            ctx,
            &format!(
                r#"mutation {{ createMessage(input: {{content: "{}", author: "{}"}}) {{ id }} }}"#,
                content, author
            ),
        );
        assert!(errors.is_empty(), "{:?}", errors);
        data["createMessage"]["id"].as_str().unwrap().to_owned()
    }

    #[test]
    fn hello_says_hello() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);
        let res = execute_sync("{ hello }", None, &schema, &Variables::new(), &ctx);
        assert_eq!(res, Ok((graphql_value!({ "hello": "Hello world!" }), vec![])));
    }

    #[test]
    fn create_then_get_returns_the_same_message() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);
        let id = create(&schema, &ctx, "hi", "ann");

        let (data, errors) = run(
            &schema,
            &ctx,
            &format!(r#"{{ getMessage(id: "{}") {{ id content author }} }}"#, id),
        );
        assert!(errors.is_empty());
        assert_eq!(
            data,
            serde_json::json!({ "getMessage": { "id": id, "content": "hi", "author": "ann" } })
        );
    }

    #[test]
    fn update_replaces_both_fields() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);
        let id = create(&schema, &ctx, "hi", "ann");

        let (data, errors) = run(
            &schema,
            &ctx,
            &format!(
                r#"mutation {{ updateMessage(id: "{}", input: {{content: "bye"}}) {{ content author }} }}"#,
                id
            ),
        );
        assert!(errors.is_empty());
        assert_eq!(
            data,
            serde_json::json!({ "updateMessage": { "content": "bye", "author": null } })
        );

        let (data, _) = run(
            &schema,
            &ctx,
            &format!(r#"{{ getMessage(id: "{}") {{ content author }} }}"#, id),
        );
        assert_eq!(
            data,
            serde_json::json!({ "getMessage": { "content": "bye", "author": null } })
        );
    }

    #[test]
    fn unknown_message_is_not_found() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);

        let (data, errors) = run(
            &schema,
            &ctx,
            r#"{ getMessage(id: "does-not-exist") { id } }"#,
        );
        assert_eq!(data, serde_json::json!({ "getMessage": null }));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0]["message"],
            "No message exists with id does-not-exist"
        );
        assert_eq!(errors[0]["extensions"]["code"], "NOT_FOUND");

        let (data, errors) = run(
            &schema,
            &ctx,
            r#"mutation { updateMessage(id: "does-not-exist", input: {content: "x"}) { id } }"#,
        );
        assert_eq!(data, serde_json::json!({ "updateMessage": null }));
        assert_eq!(errors[0]["extensions"]["code"], "NOT_FOUND");
    }

    #[test]
    fn failing_field_leaves_siblings_resolved() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);

        let (data, errors) = run(
            &schema,
            &ctx,
            r#"{ hello getMessage(id: "missing") { id } rollDice(max: 0) }"#,
        );
        assert_eq!(data["hello"], "Hello world!");
        assert_eq!(data["getMessage"], Json::Null);
        assert_eq!(data["rollDice"], Json::Null);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn die_rolls_stay_within_its_sides() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);

        let (data, errors) = run(
            &schema,
            &ctx,
            "{ getDie(numSides: 3) { numSides rollOnce roll(numRolls: 25) } }",
        );
        assert!(errors.is_empty());
        let die = &data["getDie"];
        assert_eq!(die["numSides"], 3);
        let once = die["rollOnce"].as_i64().unwrap();
        assert!((1..=3).contains(&once));
        let rolls = die["roll"].as_array().unwrap();
        assert_eq!(rolls.len(), 25);
        assert!(rolls
            .iter()
            .all(|v| (1..=3).contains(&v.as_i64().unwrap())));
    }

    #[test]
    fn die_defaults_to_six_sides() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);

        let (data, _) = run(&schema, &ctx, "{ getDie { numSides roll(numRolls: 0) } }");
        assert_eq!(
            data,
            serde_json::json!({ "getDie": { "numSides": 6, "roll": [] } })
        );
    }

    #[test]
    fn oversized_roll_nulls_only_that_field() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);

        let (data, errors) = run(
            &schema,
            &ctx,
            "{ getDie(numSides: 4) { numSides roll(numRolls: 2147483647) } }",
        );
        assert_eq!(
            data,
            serde_json::json!({ "getDie": { "numSides": 4, "roll": null } })
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["extensions"]["code"], "BAD_USER_INPUT");
        assert_eq!(errors[0]["path"], serde_json::json!(["getDie", "roll"]));
    }

    #[test]
    fn roll_dice_validates_max() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);

        let (data, errors) = run(&schema, &ctx, "{ rollDice(max: 4) }");
        assert!(errors.is_empty());
        assert!((1..=4).contains(&data["rollDice"].as_i64().unwrap()));

        let (_, errors) = run(&schema, &ctx, "{ rollDice(max: -2) }");
        assert_eq!(errors[0]["extensions"]["code"], "BAD_USER_INPUT");
    }

    #[test]
    fn users_come_from_the_seeded_directory() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);

        let (data, errors) = run(
            &schema,
            &ctx,
            r#"{ a: user(id: "a") { id name } z: user(id: "z") { name } none: user { name } }"#,
        );
        assert!(errors.is_empty());
        assert_eq!(
            data,
            serde_json::json!({ "a": { "id": "a", "name": "alice" }, "z": null, "none": null })
        );
    }

    #[test]
    fn ip_reads_the_request_context() {
        let schema = new_schema();
        let state = AppState::default();

        let (data, _) = run(&schema, &state.context(None), "{ ip }");
        assert_eq!(data, serde_json::json!({ "ip": null }));

        let ctx = state.context(Some("10.1.2.3".parse().unwrap()));
        let (data, _) = run(&schema, &ctx, "{ ip }");
        assert_eq!(data, serde_json::json!({ "ip": "10.1.2.3" }));
    }

    #[test]
    fn unknown_fields_are_rejected_before_resolving() {
        let schema = new_schema();
        let ctx = AppState::default().context(None);
        let res = execute_sync("{ deleteEverything }", None, &schema, &Variables::new(), &ctx);
        assert!(res.is_err());
    }

    #[test]
    fn sdl_declares_the_contract() {
        let sdl = schema_sdl();
        for needle in [
            "getMessage(id: ID!): Message",
            "getDie(numSides: Int): RandomDie!",
            "rollDice(max: Int!): Int",
            "roll(numRolls: Int!): [Int!]",
            "createMessage(input: MessageInput!): Message",
            "updateMessage(id: ID!, input: MessageInput!): Message",
            "input MessageInput",
        ] {
            assert!(sdl.contains(needle), "missing `{}` in\n{}", needle, sdl);
        }
    }
}
