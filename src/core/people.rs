use crate::errors::{AppError, AppResult};
use crate::models::person::avatar_url;
use crate::models::{PersonKind, PersonOrPlace};

#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<Option<String>>,
}

pub fn create(name: &str, kind: PersonKind, image_url: Option<String>, description: Option<String>, avatar_template: &str) -> AppResult<PersonOrPlace> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::MissingField("name".to_string()));
    }

    let image_url = image_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| avatar_url(avatar_template, name));

    Ok(PersonOrPlace {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        kind,
        image_url,
        description: description.filter(|d| !d.trim().is_empty()),
    })
}

pub fn update(people: &mut [PersonOrPlace], id: &str, patch: PersonPatch) -> AppResult<PersonOrPlace> {
    let p = people
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::PersonNotFound(id.to_string()))?;

    if let Some(name) = patch.name {
        if name.trim().is_empty() {
            return Err(AppError::MissingField("name".to_string()));
        }
        p.name = name.trim().to_string();
    }
    if let Some(url) = patch.image_url {
        p.image_url = url;
    }
    if let Some(desc) = patch.description {
        p.description = desc.filter(|d| !d.trim().is_empty());
    }
    Ok(p.clone())
}

pub fn delete(people: &mut Vec<PersonOrPlace>, id: &str) -> AppResult<PersonOrPlace> {
    let idx = people
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| AppError::PersonNotFound(id.to_string()))?;
    Ok(people.remove(idx))
}

pub fn filter(people: &[PersonOrPlace], kind: Option<PersonKind>) -> Vec<&PersonOrPlace> {
    people
        .iter()
        .filter(|p| kind.is_none_or(|k| p.kind == k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_gets_avatar() {
        let p = create("Ana", PersonKind::Person, None, None, "https://a/{name}").unwrap();
        assert_eq!(p.image_url, "https://a/Ana");
        assert!(create(" ", PersonKind::Place, None, None, "x").is_err());
    }

    #[test]
    fn update_delete_filter() {
        let mut people = vec![
            create("Ana", PersonKind::Person, None, None, "{name}").unwrap(),
            create("Cole", PersonKind::Place, Some("data:image/png;base64,AA".into()), None, "{name}").unwrap(),
        ];
        let id = people[0].id.clone();

        let p = update(
            &mut people,
            &id,
            PersonPatch {
                description: Some(Some("Tía".into())),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(p.description.as_deref(), Some("Tía"));
        assert_eq!(filter(&people, Some(PersonKind::Place)).len(), 1);

        delete(&mut people, &id).unwrap();
        assert!(matches!(delete(&mut people, &id), Err(AppError::PersonNotFound(_))));
    }
}
