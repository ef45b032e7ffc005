use super::{Category, Command, Context};
use crate::{
    error::ShellError,
    select::select,
    value::{Response, Value, ValueType},
};

/// Run a select statement against a response's JSON body.
pub fn select_response(resp: &Response, statement: &str) -> Result<Value, ShellError> {
    let document = resp.json()?;
    let selected = select(&document, statement)?;
    Ok(Value::json(&selected))
}

pub struct SelectCommand;

impl Command for SelectCommand {
    fn name(&self) -> &str {
        "select"
    }

    fn category(&self) -> Category {
        Category::Json
    }

    fn help(&self) -> &str {
        "selects a sub-tree of a JSON response.

Given a Response named resp containing the following JSON:

    {
       \"dog\": {
           \"name\": \"Fluffy\",
           \"nicknames\": [ \"Mr Fluffy\", \"Fluffster\", \"Fluffles\" ],
           \"breed\": \"Chihuahua\"
        },
        \"_links\": []
    }

For example:

    display all of the JSON in the response.
    -> select resp

    display only the dog node.
    -> select resp dog

    display only the dog's nicknames.
    -> select resp dog.nicknames

    display all properties ending in name.
    -> select resp dog.*name

    display only the dog's name and breed.
    -> select resp dog.name,breed

    display the dog's nicknames and its name.
    -> select resp dog(name).nicknames"
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some((name, rest)) = args.split_first() else {
            return Err(ShellError::Usage(
                "usage: select RESPONSE [SELECT_STATEMENT]".to_string(),
            ));
        };
        let resp = ctx.env.lookup(name, Some(ValueType::Response))?;
        let Some(resp) = resp.as_response() else {
            return Err(ShellError::Usage(format!("'{}' is not a Response", name)));
        };
        if !resp.is_json() {
            return Err(ShellError::NotJson);
        }

        match rest {
            [statement] => select_response(resp, statement),
            _ => Ok(Value::Response(resp.clone())),
        }
    }
}
