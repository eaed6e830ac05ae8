/// Pulls the killmail id out of a zKillboard link such as
/// `https://zkillboard.com/kill/106739819/`.
///
/// The id is the second-to-last `/` segment. Nothing is validated: a link
/// without the trailing slash yields the wrong segment, one without any
/// slash yields an empty string.
pub fn killmail_id_from_link(link: &str) -> String {
    let segments: Vec<&str> = link.split('/').collect();
    if segments.len() < 2 {
        return String::new();
    }
    segments[segments.len() - 2].to_string()
}
