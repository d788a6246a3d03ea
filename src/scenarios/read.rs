use crate::brands::{BRANDS_PATH, messages};
use crate::http::HttpMethod;
use crate::testing::Assertion;

use super::{
    BRAND_ID, RequestTemplate, Scenario, SetupPolicy, Step, Suite, create_fixture_brand, get_brand,
    var,
};

const NONEXISTENT_ID: &str = "01JK0XXX0XXX0XXX0XXX0XXX";
const MALFORMED_ID: &str = "invalid-id-123";
const SPECIAL_CHARS_ID: &str = "@#!$%^&*";
const PADDED_ID: &str = " valid-id ";

pub(super) fn suite() -> Suite {
    Suite::new("read")
        .setup(create_fixture_brand())
        .setup_policy(SetupPolicy::BestEffort)
        .scenario(
            Scenario::new("returns an existing brand").step(
                Step::new(get_brand(&var(BRAND_ID)))
                    .expect(Assertion::status(200))
                    .expect(Assertion::body("name").exists())
                    .expect(Assertion::body("slug").exists()),
            ),
        )
        .scenario(
            Scenario::new("answers 404 for a well-formed unknown id").step(
                Step::new(get_brand(NONEXISTENT_ID))
                    .expect(Assertion::status(404))
                    .expect(Assertion::body("message").equals(messages::NOT_FOUND)),
            ),
        )
        .scenario(
            Scenario::new("answers 404 for a malformed id").step(
                Step::new(get_brand(MALFORMED_ID))
                    .expect(Assertion::status(404))
                    .expect(Assertion::body("message").exists()),
            ),
        )
        .scenario(
            Scenario::new("answers 404 for a literal null id").step(
                Step::new(get_brand("null"))
                    .expect(Assertion::status(404))
                    .expect(Assertion::body("message").equals(messages::NOT_FOUND)),
            ),
        )
        .scenario(
            Scenario::new("answers 404 for special characters in the id").step(
                Step::new(get_brand(SPECIAL_CHARS_ID))
                    .expect(Assertion::status(404))
                    .expect(Assertion::body("message").equals(messages::NOT_FOUND)),
            ),
        )
        .scenario(
            Scenario::new("rejects whitespace around the id").step(
                Step::new(get_brand(PADDED_ID)).expect(Assertion::status_one_of(&[400, 404])),
            ),
        )
        .scenario(
            Scenario::new("answers 405 for POST on a brand").step(
                Step::new(
                    RequestTemplate::new(HttpMethod::Post, &[BRANDS_PATH, var(BRAND_ID).as_str()])
                        .accept_json(),
                )
                .expect(Assertion::status(405)),
            ),
        )
        .scenario(
            Scenario::new("serves a brand without an Accept header").step(
                Step::new(RequestTemplate::new(HttpMethod::Get, &[BRANDS_PATH, var(BRAND_ID).as_str()]))
                    .expect(Assertion::status_one_of(&[200, 406])),
            ),
        )
}
