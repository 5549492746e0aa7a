use rusqlite::{params, Connection, OptionalExtension};

use super::{expect_one_row, Record};
use crate::db::DatabaseError;
use crate::models::enums::Table;
use crate::models::*;

pub fn insert_image(conn: &Connection, image: &Image) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO images (id, image_name, image_url, widget_type) VALUES (?1, ?2, ?3, ?4)",
        params![image.id, image.image_name, image.image_url, image.widget_type],
    )?;
    Ok(())
}

pub fn update_image(conn: &Connection, image: &Image) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE images SET image_name = ?2, image_url = ?3, widget_type = ?4 WHERE id = ?1",
        params![image.id, image.image_name, image.image_url, image.widget_type],
    )?;
    expect_one_row(changed, Table::Image, image.id)
}

pub fn get_image(conn: &Connection, id: i64) -> Result<Option<Image>, DatabaseError> {
    let image = conn
        .query_row(
            "SELECT id, image_name, image_url, widget_type FROM images WHERE id = ?1",
            params![id],
            |row| {
                Ok(Image {
                    id: row.get(0)?,
                    image_name: row.get(1)?,
                    image_url: row.get(2)?,
                    widget_type: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(image)
}

impl Record for Image {
    const TABLE: Table = Table::Image;

    fn id(&self) -> i64 {
        self.id
    }

    fn insert(&self, conn: &Connection) -> Result<(), DatabaseError> {
        insert_image(conn, self)
    }

    fn update(&self, conn: &Connection) -> Result<(), DatabaseError> {
        update_image(conn, self)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>, DatabaseError> {
        get_image(conn, id)
    }
}
