// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for PHP test-method discovery.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

fn methods(source: &str) -> BTreeMap<String, LineRange> {
    match discover_test_methods(source) {
        Discovery::Methods(m) => m,
        Discovery::Skipped(reason) => panic!("unexpected skip: {reason:?}"),
    }
}

#[test]
fn finds_test_methods_with_namespace_and_class() {
    let source = r#"<?php

namespace App\Tests;

class FooTest
{
    public function testBar(): void
    {
        $this->assertTrue(true);
    }

    public function testBaz(): void
    {
        $this->assertTrue(true);
    }
}
"#;
    let found = methods(source);
    assert_eq!(found.len(), 2);
    assert!(found.contains_key("App\\Tests\\FooTest::testBar"));
    assert!(found.contains_key("App\\Tests\\FooTest::testBaz"));
}

#[test]
fn records_declaration_line_ranges() {
    let source = r#"<?php

namespace App\Tests;

class FooTest
{
    public function testBar(): void
    {
        $this->assertTrue(true);
    }
}
"#;
    let found = methods(source);
    let range = found["App\\Tests\\FooTest::testBar"];
    // Declaration spans lines 7-10 of the source above.
    assert_eq!(range, LineRange::new(7, 10));
}

#[test]
fn ignores_non_test_methods() {
    let source = r#"<?php

namespace App\Tests;

class FooTest
{
    public function setUp(): void
    {
    }

    protected function helperForTests(): int
    {
        return 1;
    }

    public function testOnlyThis(): void
    {
    }
}
"#;
    let found = methods(source);
    assert_eq!(found.keys().collect::<Vec<_>>(), ["App\\Tests\\FooTest::testOnlyThis"]);
}

#[test]
fn finds_methods_in_traits() {
    let source = r#"<?php

namespace App\Tests;

trait SharedAssertions
{
    public function testShared(): void
    {
    }
}
"#;
    let found = methods(source);
    assert!(found.contains_key("App\\Tests\\SharedAssertions::testShared"));
}

#[test]
fn tracks_latest_class_in_file() {
    let source = r#"<?php

namespace App\Tests;

class FirstTest
{
    public function testFirst(): void
    {
    }
}

class SecondTest
{
    public function testSecond(): void
    {
    }
}
"#;
    let found = methods(source);
    assert!(found.contains_key("App\\Tests\\FirstTest::testFirst"));
    assert!(found.contains_key("App\\Tests\\SecondTest::testSecond"));
}

#[test]
fn syntax_error_is_a_skip_not_a_failure() {
    let source = "<?php class Broken { public function testX( {";
    assert!(matches!(
        discover_test_methods(source),
        Discovery::Skipped(SkipReason::Unparseable)
    ));
}

#[test]
fn empty_source_has_no_methods() {
    assert!(methods("<?php\n").is_empty());
}
