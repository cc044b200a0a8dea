//! Sample space served by the mock.
//!
//! Shapes follow what the delivery API returns for its public example
//! space: link objects in `sys`, ISO-8601 timestamps, localized metadata.

use serde_json::{json, Value};

use crate::Store;

pub const SPACE_ID: &str = "cfexampleapi";
pub const ACCESS_TOKEN: &str = "b4c0n73n7fu1";

fn space_link() -> Value {
    json!({"sys": {"type": "Link", "linkType": "Space", "id": SPACE_ID}})
}

fn content_type_link(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "ContentType", "id": id}})
}

fn sys(kind: &str, id: &str, revision: i64, created: &str, updated: &str) -> Value {
    json!({
        "space": space_link(),
        "type": kind,
        "id": id,
        "revision": revision,
        "createdAt": created,
        "updatedAt": updated,
        "locale": "en-US"
    })
}

fn entry_sys(id: &str, content_type: &str, revision: i64, created: &str, updated: &str) -> Value {
    let mut sys = sys("Entry", id, revision, created, updated);
    sys["contentType"] = content_type_link(content_type);
    sys
}

pub fn sample() -> Store {
    let space = json!({
        "sys": {"type": "Space", "id": SPACE_ID},
        "name": "Contentful Example API",
        "locales": [
            {"code": "en-US", "default": true, "name": "English", "fallbackCode": null},
            {"code": "tlh", "default": false, "name": "Klingon", "fallbackCode": "en-US"}
        ]
    });

    let content_types = vec![
        json!({
            "sys": sys("ContentType", "cat", 3, "2013-06-27T22:46:12.852Z", "2013-09-02T13:14:47.863Z"),
            "displayField": "name",
            "name": "Cat",
            "description": "Meow.",
            "fields": [
                {"id": "name", "name": "Name", "type": "Text", "required": true, "localized": true},
                {"id": "likes", "name": "Likes", "type": "Array", "required": false, "localized": false,
                 "items": {"type": "Symbol"}},
                {"id": "color", "name": "Color", "type": "Symbol", "required": false, "localized": false},
                {"id": "bestFriend", "name": "Best Friend", "type": "Link", "linkType": "Entry",
                 "required": false, "localized": false},
                {"id": "lives", "name": "Lives left", "type": "Integer", "required": false, "localized": false},
                {"id": "image", "name": "Image", "type": "Link", "linkType": "Asset",
                 "required": false, "localized": false}
            ]
        }),
        json!({
            "sys": sys("ContentType", "dog", 2, "2013-06-27T22:46:13.498Z", "2013-09-02T14:32:11.837Z"),
            "displayField": "name",
            "name": "Dog",
            "description": "Bark!",
            "fields": [
                {"id": "name", "name": "Name", "type": "Text", "required": true, "localized": true},
                {"id": "description", "name": "Description", "type": "Text", "required": true, "localized": false},
                {"id": "image", "name": "Image", "type": "Link", "linkType": "Asset",
                 "required": false, "localized": false}
            ]
        }),
    ];

    let entries = vec![
        json!({
            "sys": entry_sys("nyancat", "cat", 5, "2013-06-27T22:46:19.513Z", "2013-09-04T09:19:39.027Z"),
            "fields": {
                "name": "Nyan Cat",
                "likes": ["rainbows", "fish"],
                "color": "rainbow",
                "bestFriend": {"sys": {"type": "Link", "linkType": "Entry", "id": "happycat"}},
                "birthday": "2011-04-04T22:00:00+00:00",
                "lives": 1337,
                "image": {"sys": {"type": "Link", "linkType": "Asset", "id": "nyancat"}}
            }
        }),
        json!({
            "sys": entry_sys("happycat", "cat", 8, "2013-06-27T22:46:20.171Z", "2013-11-18T15:58:02.018Z"),
            "fields": {
                "name": "Happy Cat",
                "likes": ["cheezburger"],
                "color": "gray",
                "bestFriend": {"sys": {"type": "Link", "linkType": "Entry", "id": "nyancat"}},
                "birthday": "2003-10-28T23:00:00+00:00",
                "lives": 1,
                "image": {"sys": {"type": "Link", "linkType": "Asset", "id": "happycat"}}
            }
        }),
        json!({
            "sys": entry_sys("jake", "dog", 5, "2013-06-27T22:46:22.096Z", "2013-12-18T13:10:26.212Z"),
            "fields": {
                "name": "Jake",
                "description": "Bacon pancakes, makin' bacon pancakes!",
                "image": {"sys": {"type": "Link", "linkType": "Asset", "id": "jake"}}
            }
        }),
    ];

    let assets = vec![
        json!({
            "sys": sys("Asset", "nyancat", 2, "2013-09-02T14:56:34.240Z", "2013-09-02T14:56:34.240Z"),
            "fields": {
                "title": "Nyan Cat",
                "file": {
                    "fileName": "Nyan_cat_250px_frame.png",
                    "contentType": "image/png",
                    "details": {"image": {"width": 250, "height": 250}, "size": 12273},
                    "url": "//images.ctfassets.net/cfexampleapi/4gp6taAwW4CmSgumq2ekUm/Nyan_cat_250px_frame.png"
                }
            }
        }),
        json!({
            "sys": sys("Asset", "happycat", 2, "2013-09-02T14:56:34.267Z", "2013-09-02T15:11:24.361Z"),
            "fields": {
                "title": "Happy Cat",
                "description": "A happy cat.",
                "file": {
                    "fileName": "happycatw.jpg",
                    "contentType": "image/jpeg",
                    "details": {"image": {"width": 273, "height": 397}, "size": 59939},
                    "url": "//images.ctfassets.net/cfexampleapi/3MZPnjZTIskAIIkuuosCss/happycatw.jpg"
                }
            }
        }),
        json!({
            "sys": sys("Asset", "jake", 1, "2013-09-02T14:56:34.260Z", "2013-09-02T14:56:34.260Z"),
            "fields": {
                "title": "Jake",
                "file": {
                    "fileName": "jake.png",
                    "contentType": "image/png",
                    "details": {"image": {"width": 100, "height": 161}, "size": 20480},
                    "url": "//images.ctfassets.net/cfexampleapi/4hlteQAXS8iS0YCMU6QMWg/jake.png"
                }
            }
        }),
    ];

    Store {
        space_id: SPACE_ID.to_string(),
        space,
        content_types,
        entries,
        assets,
    }
}
